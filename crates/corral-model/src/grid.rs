// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Grid Model and Builder
//!
//! The frozen problem instance ([`GridModel`]) and its fail-fast builder
//! ([`GridBuilder`]).
//!
//! ## Lifecycle
//!
//! A `GridModel` can only be obtained through `GridBuilder::build`, which
//! validates the whole instance and rejects malformed input with a
//! [`ConfigError`]. After that point the model is immutable: reachability
//! engines and solver threads read it concurrently behind `&GridModel`
//! without synchronization.
//!
//! ## Layout
//!
//! Cell attributes are stored Structure-of-Arrays, indexed by row-major
//! [`CellIndex`] (`cell = row * cols + col`). Teleport channels additionally
//! keep a per-channel member list so the engine can expand teleport edges
//! without scanning the grid.

use crate::index::{CellIndex, ChannelIndex};
use rustc_hash::FxHashMap;

/// The terrain of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terrain {
    /// Walkable ground. The agent may occupy it and a wall may be placed on it.
    Open,
    /// Impassable ground. Blocks movement on its own; never a wall site.
    Water,
}

/// Validation errors raised by [`GridBuilder::build`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// No agent origin was set.
    MissingOrigin,
    /// The origin was set more than once, on two different cells.
    DuplicateOrigin {
        /// The first cell the origin was assigned to.
        first: CellIndex,
        /// The conflicting later assignment.
        second: CellIndex,
    },
    /// The wall budget is negative.
    NegativeBudget(i64),
    /// A teleport channel has fewer than two member cells and can never
    /// be traversed.
    LonelyTeleportChannel {
        /// The offending channel.
        channel: ChannelIndex,
        /// How many member cells the channel has.
        members: usize,
    },
    /// The origin cell is not open terrain.
    OriginNotOpen(CellIndex),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingOrigin => write!(f, "no agent origin was set"),
            ConfigError::DuplicateOrigin { first, second } => write!(
                f,
                "agent origin set twice: first on {}, then on {}",
                first, second
            ),
            ConfigError::NegativeBudget(budget) => {
                write!(f, "wall budget must be non-negative, got {}", budget)
            }
            ConfigError::LonelyTeleportChannel { channel, members } => write!(
                f,
                "teleport {} has {} member cell(s), at least 2 are required",
                channel, members
            ),
            ConfigError::OriginNotOpen(cell) => {
                write!(f, "agent origin {} is not open terrain", cell)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// The immutable, validated problem instance.
///
/// Constructed exclusively through [`GridBuilder::build`]. All accessors are
/// cheap reads; none of them can fail on a validated model (out-of-bounds
/// cell indices are a caller bug and are caught by `debug_assert!`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridModel {
    rows: usize,
    cols: usize,

    /// Terrain per cell. `terrain[c]` is the terrain of cell `c`.
    terrain: Vec<Terrain>,

    /// Reward flag per cell. `rewards[c]` is `true` if cell `c` carries a reward.
    rewards: Vec<bool>,

    /// Teleport channel per cell, if any.
    channels: Vec<Option<ChannelIndex>>,

    /// Member cells per channel, in ascending row-major order.
    channel_members: FxHashMap<ChannelIndex, Vec<CellIndex>>,

    /// The agent origin cell.
    origin: CellIndex,

    /// Maximum number of walls a solution may place.
    budget: usize,
}

impl GridModel {
    /// Returns the number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the total number of cells (`rows * cols`).
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.rows * self.cols
    }

    /// Returns the agent origin cell.
    #[inline]
    pub fn origin(&self) -> CellIndex {
        self.origin
    }

    /// Returns the maximum number of walls a solution may place.
    #[inline]
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Returns the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `row` or `col` is out of bounds.
    #[inline]
    pub fn cell_at(&self, row: usize, col: usize) -> CellIndex {
        debug_assert!(
            row < self.rows && col < self.cols,
            "called `GridModel::cell_at` with position out of bounds: the grid is {}x{} but the position is ({}, {})",
            self.rows,
            self.cols,
            row,
            col
        );
        CellIndex::new(row * self.cols + col)
    }

    /// Returns the `(row, col)` position of a cell.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `cell` is out of bounds.
    #[inline]
    pub fn position(&self, cell: CellIndex) -> (usize, usize) {
        let index = cell.get();
        debug_assert!(
            index < self.num_cells(),
            "called `GridModel::position` with cell index out of bounds: the len is {} but the index is {}",
            self.num_cells(),
            index
        );
        (index / self.cols, index % self.cols)
    }

    /// Returns the terrain of a cell.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `cell` is out of bounds.
    #[inline]
    pub fn terrain(&self, cell: CellIndex) -> Terrain {
        let index = cell.get();
        debug_assert!(
            index < self.num_cells(),
            "called `GridModel::terrain` with cell index out of bounds: the len is {} but the index is {}",
            self.num_cells(),
            index
        );
        self.terrain[index]
    }

    /// Returns `true` if the cell is water.
    #[inline]
    pub fn is_water(&self, cell: CellIndex) -> bool {
        self.terrain(cell) == Terrain::Water
    }

    /// Returns `true` if the cell carries a reward.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `cell` is out of bounds.
    #[inline]
    pub fn is_reward(&self, cell: CellIndex) -> bool {
        let index = cell.get();
        debug_assert!(
            index < self.num_cells(),
            "called `GridModel::is_reward` with cell index out of bounds: the len is {} but the index is {}",
            self.num_cells(),
            index
        );
        self.rewards[index]
    }

    /// Returns the teleport channel of a cell, if any.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `cell` is out of bounds.
    #[inline]
    pub fn channel(&self, cell: CellIndex) -> Option<ChannelIndex> {
        let index = cell.get();
        debug_assert!(
            index < self.num_cells(),
            "called `GridModel::channel` with cell index out of bounds: the len is {} but the index is {}",
            self.num_cells(),
            index
        );
        self.channels[index]
    }

    /// Returns all member cells of a teleport channel, in ascending
    /// row-major order. Unknown channels map to the empty slice.
    #[inline]
    pub fn channel_members(&self, channel: ChannelIndex) -> &[CellIndex] {
        self.channel_members
            .get(&channel)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns `true` if the cell lies on the outermost ring of the grid.
    ///
    /// Reaching any boundary cell means the agent has escaped.
    #[inline]
    pub fn is_boundary(&self, cell: CellIndex) -> bool {
        let (row, col) = self.position(cell);
        row == 0 || col == 0 || row == self.rows - 1 || col == self.cols - 1
    }

    /// Returns the 4-connected orthogonal neighbors of a cell.
    ///
    /// The order is fixed (up, down, left, right) so traversals over the
    /// grid are deterministic.
    #[inline]
    pub fn neighbors(&self, cell: CellIndex) -> impl Iterator<Item = CellIndex> + '_ {
        let (row, col) = self.position(cell);
        let up = (row > 0).then(|| self.cell_at(row - 1, col));
        let down = (row + 1 < self.rows).then(|| self.cell_at(row + 1, col));
        let left = (col > 0).then(|| self.cell_at(row, col - 1));
        let right = (col + 1 < self.cols).then(|| self.cell_at(row, col + 1));
        [up, down, left, right].into_iter().flatten()
    }

    /// Returns an iterator over all cells in row-major order.
    #[inline]
    pub fn cells(&self) -> impl Iterator<Item = CellIndex> {
        (0..self.num_cells()).map(CellIndex::new)
    }
}

/// Mutable builder for [`GridModel`].
///
/// Cells start out as open terrain with no reward and no teleport channel.
/// `build` validates the accumulated instance and either returns the frozen
/// model or the first [`ConfigError`] it encounters.
///
/// # Examples
///
/// ```rust
/// use corral_model::grid::GridBuilder;
///
/// let mut builder = GridBuilder::new(5, 5);
/// builder.set_origin(builder.cell_at(2, 2));
/// builder.set_budget(4);
/// let grid = builder.build().unwrap();
/// assert_eq!(grid.num_cells(), 25);
/// assert_eq!(grid.budget(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct GridBuilder {
    rows: usize,
    cols: usize,
    terrain: Vec<Terrain>,
    rewards: Vec<bool>,
    channels: Vec<Option<ChannelIndex>>,
    origin: Option<CellIndex>,
    duplicate_origin: Option<CellIndex>,
    budget: i64,
}

impl GridBuilder {
    /// Creates a builder for a `rows x cols` grid of open terrain.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(
            rows > 0 && cols > 0,
            "called `GridBuilder::new` with empty dimensions: {}x{}",
            rows,
            cols
        );
        let num_cells = rows * cols;
        Self {
            rows,
            cols,
            terrain: vec![Terrain::Open; num_cells],
            rewards: vec![false; num_cells],
            channels: vec![None; num_cells],
            origin: None,
            duplicate_origin: None,
            budget: 0,
        }
    }

    /// Returns the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `row` or `col` is out of bounds.
    #[inline]
    pub fn cell_at(&self, row: usize, col: usize) -> CellIndex {
        debug_assert!(
            row < self.rows && col < self.cols,
            "called `GridBuilder::cell_at` with position out of bounds: the grid is {}x{} but the position is ({}, {})",
            self.rows,
            self.cols,
            row,
            col
        );
        CellIndex::new(row * self.cols + col)
    }

    /// Sets the terrain of a cell.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `cell` is out of bounds.
    #[inline]
    pub fn set_terrain(&mut self, cell: CellIndex, terrain: Terrain) -> &mut Self {
        let index = cell.get();
        debug_assert!(
            index < self.terrain.len(),
            "called `GridBuilder::set_terrain` with cell index out of bounds: the len is {} but the index is {}",
            self.terrain.len(),
            index
        );
        self.terrain[index] = terrain;
        self
    }

    /// Marks or clears the reward flag of a cell.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `cell` is out of bounds.
    #[inline]
    pub fn set_reward(&mut self, cell: CellIndex, reward: bool) -> &mut Self {
        let index = cell.get();
        debug_assert!(
            index < self.rewards.len(),
            "called `GridBuilder::set_reward` with cell index out of bounds: the len is {} but the index is {}",
            self.rewards.len(),
            index
        );
        self.rewards[index] = reward;
        self
    }

    /// Assigns a cell to a teleport channel.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `cell` is out of bounds.
    #[inline]
    pub fn set_channel(&mut self, cell: CellIndex, channel: ChannelIndex) -> &mut Self {
        let index = cell.get();
        debug_assert!(
            index < self.channels.len(),
            "called `GridBuilder::set_channel` with cell index out of bounds: the len is {} but the index is {}",
            self.channels.len(),
            index
        );
        self.channels[index] = Some(channel);
        self
    }

    /// Sets the agent origin.
    ///
    /// Setting the origin twice on different cells is recorded and rejected
    /// by `build` with [`ConfigError::DuplicateOrigin`].
    #[inline]
    pub fn set_origin(&mut self, cell: CellIndex) -> &mut Self {
        match self.origin {
            None => self.origin = Some(cell),
            Some(first) if first != cell && self.duplicate_origin.is_none() => {
                self.duplicate_origin = Some(cell)
            }
            Some(_) => {}
        }
        self
    }

    /// Sets the wall budget.
    ///
    /// Negative values are rejected by `build` with
    /// [`ConfigError::NegativeBudget`].
    #[inline]
    pub fn set_budget(&mut self, budget: i64) -> &mut Self {
        self.budget = budget;
        self
    }

    /// Validates the accumulated instance and freezes it into a [`GridModel`].
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingOrigin`] if no origin was set.
    /// - [`ConfigError::DuplicateOrigin`] if the origin was set on two cells.
    /// - [`ConfigError::NegativeBudget`] if the budget is negative.
    /// - [`ConfigError::OriginNotOpen`] if the origin cell is water.
    /// - [`ConfigError::LonelyTeleportChannel`] if a channel has one member.
    pub fn build(self) -> Result<GridModel, ConfigError> {
        let origin = self.origin.ok_or(ConfigError::MissingOrigin)?;
        if let Some(second) = self.duplicate_origin {
            return Err(ConfigError::DuplicateOrigin {
                first: origin,
                second,
            });
        }
        if self.budget < 0 {
            return Err(ConfigError::NegativeBudget(self.budget));
        }
        if self.terrain[origin.get()] != Terrain::Open {
            return Err(ConfigError::OriginNotOpen(origin));
        }

        // Cells are scanned in row-major order, so member lists come out
        // sorted without an extra pass.
        let mut channel_members: FxHashMap<ChannelIndex, Vec<CellIndex>> = FxHashMap::default();
        for (index, channel) in self.channels.iter().enumerate() {
            if let Some(channel) = channel {
                channel_members
                    .entry(*channel)
                    .or_default()
                    .push(CellIndex::new(index));
            }
        }
        for (channel, members) in channel_members.iter() {
            if members.len() < 2 {
                return Err(ConfigError::LonelyTeleportChannel {
                    channel: *channel,
                    members: members.len(),
                });
            }
        }

        Ok(GridModel {
            rows: self.rows,
            cols: self.cols,
            terrain: self.terrain,
            rewards: self.rewards,
            channels: self.channels,
            channel_members,
            origin,
            budget: self.budget as usize,
        })
    }
}
