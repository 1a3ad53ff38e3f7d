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

//! # Reachability Engine
//!
//! Breadth-first search over the movement graph: 4-connected orthogonal
//! steps plus teleport edges between all members of a channel. The agent
//! escapes as soon as any boundary cell is reachable; an escape nullifies
//! the score but the traversal still completes, because the raw closure
//! (pre-nullification) is what the exact solver uses as an optimistic
//! bound.
//!
//! ## Buffers
//!
//! The engine owns its visited bitset, BFS queue, and parent links and
//! reuses them across calls, so evaluating many placements on the same
//! grid allocates only for the returned [`Evaluation`]. One engine per
//! thread; the engine itself is cheap to construct.
//!
//! ## Monotonicity
//!
//! Adding walls can only shrink the reachable closure. Consequently the
//! raw score ([`Evaluation::raw_score`]) of a placement is an upper bound
//! on the score of every placement that extends it. The exact solver
//! leans on this invariant; it holds because [`ScoreRules`] never allows
//! a negative reward bonus.

use corral_model::{CellIndex, GridModel, Placement, ScoreRules};
use fixedbitset::FixedBitSet;

/// Sentinel for "no BFS parent".
const NO_PARENT: usize = usize::MAX;

/// The scored result of one reachability evaluation.
///
/// Carries both the nullified score (zero on escape) and the raw
/// pre-nullification closure, which bounds every descendant placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    escaped: bool,
    visited: FixedBitSet,
    raw_area: i64,
    raw_bonus: i64,
    escape_path: Vec<CellIndex>,
}

impl Evaluation {
    /// Returns `true` if the agent can reach a boundary cell.
    #[inline]
    pub fn escaped(&self) -> bool {
        self.escaped
    }

    /// Returns the enclosed area (zero if the agent escapes).
    #[inline]
    pub fn area(&self) -> i64 {
        if self.escaped {
            0
        } else {
            self.raw_area
        }
    }

    /// Returns the reward bonus (zero if the agent escapes).
    #[inline]
    pub fn bonus(&self) -> i64 {
        if self.escaped {
            0
        } else {
            self.raw_bonus
        }
    }

    /// Returns the score, `area + bonus` (zero if the agent escapes).
    #[inline]
    pub fn score(&self) -> i64 {
        self.area() + self.bonus()
    }

    /// Returns the score of the raw closure, ignoring escape nullification.
    ///
    /// This is an upper bound on [`Evaluation::score`] for this placement
    /// and for every placement that adds further walls to it.
    #[inline]
    pub fn raw_score(&self) -> i64 {
        self.raw_area + self.raw_bonus
    }

    /// Returns `true` if `cell` is in the raw closure, whether or not the
    /// agent escapes.
    #[inline]
    pub fn raw_reachable(&self, cell: CellIndex) -> bool {
        self.visited.contains(cell.get())
    }

    /// Returns `true` if `cell` is enclosed (reachable and no escape).
    #[inline]
    pub fn contains(&self, cell: CellIndex) -> bool {
        !self.escaped && self.visited.contains(cell.get())
    }

    /// Returns the number of cells in the raw closure.
    #[inline]
    pub fn num_visited(&self) -> usize {
        self.visited.count_ones(..)
    }

    /// Returns an iterator over the enclosed cells in ascending row-major
    /// order. Empty if the agent escapes.
    #[inline]
    pub fn reachable(&self) -> impl Iterator<Item = CellIndex> + '_ {
        let limit = if self.escaped { 0 } else { usize::MAX };
        self.visited.ones().take(limit).map(CellIndex::new)
    }

    /// Returns a witness escape route from the origin to a boundary cell,
    /// or the empty slice if the agent is enclosed.
    ///
    /// Consecutive cells are either orthogonal neighbors or members of the
    /// same teleport channel. The first cell is the origin; if the origin
    /// itself lies on the boundary the path is just the origin.
    #[inline]
    pub fn escape_path(&self) -> &[CellIndex] {
        &self.escape_path
    }
}

/// BFS engine with reusable buffers.
///
/// # Examples
///
/// ```rust
/// use corral_model::{GridBuilder, Placement};
/// use corral_reach::ReachabilityEngine;
///
/// let mut builder = GridBuilder::new(5, 5);
/// builder.set_origin(builder.cell_at(2, 2));
/// let grid = builder.build().unwrap();
///
/// let mut engine = ReachabilityEngine::new();
/// let open = engine.evaluate(&grid, &Placement::empty());
/// assert!(open.escaped());
/// assert_eq!(open.score(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct ReachabilityEngine {
    rules: ScoreRules,
    visited: FixedBitSet,
    queue: Vec<usize>,
    parents: Vec<usize>,
    blocked_scratch: FixedBitSet,
}

impl ReachabilityEngine {
    /// Creates an engine with default scoring rules.
    #[inline]
    pub fn new() -> Self {
        Self::with_rules(ScoreRules::default())
    }

    /// Creates an engine with the given scoring rules.
    #[inline]
    pub fn with_rules(rules: ScoreRules) -> Self {
        Self {
            rules,
            visited: FixedBitSet::new(),
            queue: Vec::new(),
            parents: Vec::new(),
            blocked_scratch: FixedBitSet::new(),
        }
    }

    /// Returns the scoring rules this engine applies.
    #[inline]
    pub fn rules(&self) -> ScoreRules {
        self.rules
    }

    /// Evaluates a wall placement.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the placement blocks the origin.
    pub fn evaluate(&mut self, grid: &GridModel, placement: &Placement) -> Evaluation {
        let mut blocked = std::mem::take(&mut self.blocked_scratch);
        blocked.clear();
        blocked.grow(grid.num_cells());
        for cell in placement.iter() {
            blocked.insert(cell.get());
        }
        let evaluation = self.evaluate_blocked(grid, &blocked);
        self.blocked_scratch = blocked;
        evaluation
    }

    /// Evaluates a wall set given directly as a bitset over cell indices.
    ///
    /// This is the hot path of the exact solver, which maintains its wall
    /// set as a bitset across branching decisions.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `blocked` is smaller than the grid or
    /// blocks the origin.
    pub fn evaluate_blocked(&mut self, grid: &GridModel, blocked: &FixedBitSet) -> Evaluation {
        let num_cells = grid.num_cells();
        let origin = grid.origin().get();
        debug_assert!(
            blocked.len() >= num_cells,
            "called `ReachabilityEngine::evaluate_blocked` with undersized bitset: the grid has {} cells but the bitset has {}",
            num_cells,
            blocked.len()
        );
        debug_assert!(
            !blocked.contains(origin),
            "called `ReachabilityEngine::evaluate_blocked` with the origin blocked"
        );

        self.visited.clear();
        self.visited.grow(num_cells);
        self.parents.clear();
        self.parents.resize(num_cells, NO_PARENT);
        self.queue.clear();

        self.visited.insert(origin);
        self.queue.push(origin);
        let mut escaped_at: Option<usize> = None;

        let mut head = 0;
        while head < self.queue.len() {
            let current = self.queue[head];
            head += 1;
            let cell = CellIndex::new(current);

            // The traversal runs to completion even after an escape: the
            // full raw closure is needed for the optimistic bound.
            if escaped_at.is_none() && grid.is_boundary(cell) {
                escaped_at = Some(current);
            }

            for neighbor in grid.neighbors(cell) {
                self.try_visit(grid, blocked, current, neighbor.get());
            }
            if let Some(channel) = grid.channel(cell) {
                for &partner in grid.channel_members(channel) {
                    if partner.get() != current {
                        self.try_visit(grid, blocked, current, partner.get());
                    }
                }
            }
        }

        let mut visited_count = 0i64;
        let mut reward_count = 0i64;
        for index in self.visited.ones() {
            visited_count += 1;
            if grid.is_reward(CellIndex::new(index)) {
                reward_count += 1;
            }
        }
        let raw_area = if self.rules.reward_counts_in_area {
            visited_count
        } else {
            visited_count - reward_count
        };
        let raw_bonus = reward_count * self.rules.reward_bonus;

        let escape_path = match escaped_at {
            Some(exit) => self.reconstruct_path(origin, exit),
            None => Vec::new(),
        };

        Evaluation {
            escaped: escaped_at.is_some(),
            visited: self.visited.clone(),
            raw_area,
            raw_bonus,
            escape_path,
        }
    }

    #[inline]
    fn try_visit(&mut self, grid: &GridModel, blocked: &FixedBitSet, parent: usize, target: usize) {
        if !self.visited.contains(target)
            && !blocked.contains(target)
            && !grid.is_water(CellIndex::new(target))
        {
            self.visited.insert(target);
            self.parents[target] = parent;
            self.queue.push(target);
        }
    }

    fn reconstruct_path(&self, origin: usize, exit: usize) -> Vec<CellIndex> {
        let mut path = Vec::new();
        let mut current = exit;
        loop {
            path.push(CellIndex::new(current));
            if current == origin {
                break;
            }
            current = self.parents[current];
            debug_assert!(current != NO_PARENT, "escape path broke off before the origin");
        }
        path.reverse();
        path
    }
}

impl Default for ReachabilityEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corral_model::{parse_map, ChannelIndex, GridBuilder, GridModel, Terrain};

    fn grid_from(text: &str) -> GridModel {
        parse_map(text, 0).unwrap().grid
    }

    /// Checks that consecutive path cells are orthogonal neighbors or
    /// members of the same teleport channel.
    fn assert_valid_escape_path(grid: &GridModel, path: &[CellIndex]) {
        assert!(!path.is_empty());
        assert_eq!(path[0], grid.origin());
        assert!(grid.is_boundary(*path.last().unwrap()));
        for pair in path.windows(2) {
            let (row_a, col_a) = grid.position(pair[0]);
            let (row_b, col_b) = grid.position(pair[1]);
            let adjacent = row_a.abs_diff(row_b) + col_a.abs_diff(col_b) == 1;
            let teleported = match (grid.channel(pair[0]), grid.channel(pair[1])) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            };
            assert!(
                adjacent || teleported,
                "path step {:?} -> {:?} is neither a move nor a teleport",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_open_grid_escapes_and_scores_zero() {
        let grid = grid_from(".....\n.....\n..H..\n.....\n.....\n");
        let mut engine = ReachabilityEngine::new();
        let eval = engine.evaluate(&grid, &Placement::empty());

        assert!(eval.escaped());
        assert_eq!(eval.score(), 0);
        assert_eq!(eval.area(), 0);
        // The raw closure still covers the whole grid.
        assert_eq!(eval.raw_score(), 25);
        assert_eq!(eval.num_visited(), 25);
        assert_eq!(eval.reachable().count(), 0);
        assert_valid_escape_path(&grid, eval.escape_path());
    }

    #[test]
    fn test_enclosed_origin_scores_one() {
        let grid = grid_from(".....\n.....\n..H..\n.....\n.....\n");
        let placement = Placement::new(vec![
            grid.cell_at(1, 2),
            grid.cell_at(3, 2),
            grid.cell_at(2, 1),
            grid.cell_at(2, 3),
        ]);
        let mut engine = ReachabilityEngine::new();
        let eval = engine.evaluate(&grid, &placement);

        assert!(!eval.escaped());
        assert_eq!(eval.score(), 1);
        assert_eq!(eval.reachable().collect::<Vec<_>>(), vec![grid.origin()]);
        assert!(eval.escape_path().is_empty());
    }

    #[test]
    fn test_water_encloses_without_walls() {
        let grid = grid_from(".....\n.~~~.\n.~H~.\n.~~~.\n.....\n");
        let mut engine = ReachabilityEngine::new();
        let eval = engine.evaluate(&grid, &Placement::empty());

        assert!(!eval.escaped());
        assert_eq!(eval.score(), 1);
    }

    #[test]
    fn test_reward_weighting() {
        // Origin and reward enclosed together by water.
        let grid = grid_from(".....\n.~~~~\n.~HC~\n.~~~~\n.....\n");
        let mut engine = ReachabilityEngine::new();
        let eval = engine.evaluate(&grid, &Placement::empty());
        assert!(!eval.escaped());
        // Two cells of area plus a bonus of three.
        assert_eq!(eval.area(), 2);
        assert_eq!(eval.bonus(), 3);
        assert_eq!(eval.score(), 5);

        // With the reward excluded from the area count it is worth its
        // bonus alone.
        let mut engine = ReachabilityEngine::with_rules(ScoreRules::new(3, false));
        let eval = engine.evaluate(&grid, &Placement::empty());
        assert_eq!(eval.area(), 1);
        assert_eq!(eval.score(), 4);
    }

    #[test]
    fn test_escape_nullifies_reward() {
        let grid = grid_from(".....\n.....\n..HC.\n.....\n.....\n");
        let mut engine = ReachabilityEngine::new();
        let eval = engine.evaluate(&grid, &Placement::empty());

        assert!(eval.escaped());
        assert_eq!(eval.score(), 0);
        // The bound still sees the reward.
        assert_eq!(eval.raw_score(), 25 + 3);
    }

    #[test]
    fn test_teleport_breaks_enclosure() {
        // The origin is walled in, but a teleport inside the pocket pairs
        // with one in the open.
        let grid = grid_from(".....\n.....\n..H0.\n.....\n...0.\n");
        let placement = Placement::new(vec![
            grid.cell_at(1, 2),
            grid.cell_at(1, 3),
            grid.cell_at(2, 1),
            grid.cell_at(2, 4),
            grid.cell_at(3, 2),
            grid.cell_at(3, 3),
        ]);
        let mut engine = ReachabilityEngine::new();
        let eval = engine.evaluate(&grid, &placement);

        assert!(eval.escaped());
        assert_valid_escape_path(&grid, eval.escape_path());
        // The path must actually use the teleport.
        let path = eval.escape_path();
        assert!(path
            .windows(2)
            .any(|pair| grid.channel(pair[0]).is_some()
                && grid.channel(pair[0]) == grid.channel(pair[1])));
    }

    #[test]
    fn test_blocking_a_teleport_member_severs_the_edge() {
        let grid = grid_from(".....\n.....\n..H0.\n.....\n...0.\n");
        let outer_portal = grid.cell_at(4, 3);
        let placement = Placement::new(vec![
            grid.cell_at(1, 2),
            grid.cell_at(1, 3),
            grid.cell_at(2, 1),
            grid.cell_at(2, 4),
            grid.cell_at(3, 2),
            grid.cell_at(3, 3),
            outer_portal,
        ]);
        let mut engine = ReachabilityEngine::new();
        let eval = engine.evaluate(&grid, &placement);

        assert!(!eval.escaped());
        assert_eq!(eval.score(), 2);
    }

    #[test]
    fn test_origin_on_boundary_escapes_immediately() {
        let grid = grid_from("H..\n...\n...\n");
        let mut engine = ReachabilityEngine::new();
        let eval = engine.evaluate(&grid, &Placement::empty());

        assert!(eval.escaped());
        assert_eq!(eval.escape_path(), &[grid.origin()]);
    }

    #[test]
    fn test_raw_score_monotone_under_added_walls() {
        let grid = grid_from(".......\n.......\n...H...\n....C..\n.......\n.......\n.......\n");
        let mut engine = ReachabilityEngine::new();

        let mut walls = Vec::new();
        let mut previous = engine.evaluate(&grid, &Placement::empty()).raw_score();
        for cell in [
            grid.cell_at(1, 3),
            grid.cell_at(2, 2),
            grid.cell_at(4, 4),
            grid.cell_at(3, 5),
            grid.cell_at(5, 3),
        ] {
            walls.push(cell);
            let raw = engine.evaluate(&grid, &Placement::new(walls.clone())).raw_score();
            assert!(raw <= previous, "raw score rose from {} to {}", previous, raw);
            previous = raw;
        }
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let grid = grid_from(".....\n.~.0.\n..H..\n.C.0.\n.....\n");
        let placement = Placement::new(vec![grid.cell_at(1, 2), grid.cell_at(3, 2)]);
        let mut engine = ReachabilityEngine::new();
        let first = engine.evaluate(&grid, &placement);
        let second = engine.evaluate(&grid, &placement);
        assert_eq!(first, second);
    }

    #[test]
    fn test_buffers_survive_grid_size_changes() {
        let mut engine = ReachabilityEngine::new();
        let large = grid_from(".......\n.......\n...H...\n.......\n.......\n");
        let small = grid_from("...\n.H.\n...\n");
        assert_eq!(engine.evaluate(&large, &Placement::empty()).num_visited(), 35);
        assert_eq!(engine.evaluate(&small, &Placement::empty()).num_visited(), 9);
    }

    #[test]
    fn test_evaluate_blocked_matches_evaluate() {
        let grid = grid_from(".....\n.....\n..H..\n.....\n.....\n");
        let placement = Placement::new(vec![grid.cell_at(1, 2), grid.cell_at(2, 1)]);
        let mut blocked = fixedbitset::FixedBitSet::with_capacity(grid.num_cells());
        for cell in placement.iter() {
            blocked.insert(cell.get());
        }
        let mut engine = ReachabilityEngine::new();
        assert_eq!(
            engine.evaluate(&grid, &placement),
            engine.evaluate_blocked(&grid, &blocked)
        );
    }

    #[test]
    fn test_channel_map_from_builder() {
        let mut builder = GridBuilder::new(3, 3);
        builder.set_origin(builder.cell_at(1, 1));
        builder.set_terrain(builder.cell_at(0, 1), Terrain::Water);
        builder.set_channel(builder.cell_at(1, 0), ChannelIndex::new(3));
        builder.set_channel(builder.cell_at(2, 2), ChannelIndex::new(3));
        let grid = builder.build().unwrap();

        let mut engine = ReachabilityEngine::new();
        let eval = engine.evaluate(&grid, &Placement::empty());
        assert!(eval.escaped());
        assert!(eval.raw_reachable(grid.cell_at(2, 2)));
    }
}
