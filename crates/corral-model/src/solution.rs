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

//! # Wall Placements and Solutions
//!
//! A [`Placement`] is a canonical (sorted, deduplicated) set of wall cells.
//! A [`Solution`] pairs a placement with the score it achieves and whether
//! the agent escapes under it. Solutions are plain values; all scoring is
//! done by the reachability engine before a `Solution` is constructed.

use crate::grid::GridModel;
use crate::index::CellIndex;

/// A canonical set of wall cells.
///
/// Cells are kept sorted in ascending row-major order with duplicates
/// removed, so two placements describing the same wall set always compare
/// equal and membership tests are a binary search.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Placement {
    cells: Vec<CellIndex>,
}

impl Placement {
    /// Creates a placement from an arbitrary list of cells.
    ///
    /// The list is sorted and deduplicated.
    pub fn new(mut cells: Vec<CellIndex>) -> Self {
        cells.sort_unstable();
        cells.dedup();
        Self { cells }
    }

    /// Creates an empty placement.
    #[inline]
    pub fn empty() -> Self {
        Self { cells: Vec::new() }
    }

    /// Returns the number of walls.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the placement contains no walls.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns `true` if the placement contains `cell`.
    #[inline]
    pub fn contains(&self, cell: CellIndex) -> bool {
        self.cells.binary_search(&cell).is_ok()
    }

    /// Returns the wall cells in ascending row-major order.
    #[inline]
    pub fn cells(&self) -> &[CellIndex] {
        &self.cells
    }

    /// Returns a new placement with `cell` added.
    pub fn with_cell(&self, cell: CellIndex) -> Self {
        match self.cells.binary_search(&cell) {
            Ok(_) => self.clone(),
            Err(position) => {
                let mut cells = self.cells.clone();
                cells.insert(position, cell);
                Self { cells }
            }
        }
    }

    /// Returns an iterator over the wall cells.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.cells.iter().copied()
    }
}

impl FromIterator<CellIndex> for Placement {
    fn from_iter<I: IntoIterator<Item = CellIndex>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A scored wall placement.
///
/// Invariant: an escaped solution always has score zero, because an escape
/// nullifies the enclosure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    placement: Placement,
    score: i64,
    escaped: bool,
}

impl Solution {
    /// Constructs a new `Solution`.
    ///
    /// # Panics
    ///
    /// Panics if `escaped` is `true` but `score` is non-zero.
    pub fn new(placement: Placement, score: i64, escaped: bool) -> Self {
        assert!(
            !escaped || score == 0,
            "called `Solution::new` with an escaped solution carrying score {}",
            score
        );
        Self {
            placement,
            score,
            escaped,
        }
    }

    /// Returns the wall placement.
    #[inline]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Returns the score (zero if the agent escapes).
    #[inline]
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Returns `true` if the agent escapes under this placement.
    #[inline]
    pub fn escaped(&self) -> bool {
        self.escaped
    }

    /// Returns the number of walls placed.
    #[inline]
    pub fn num_walls(&self) -> usize {
        self.placement.len()
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.escaped {
            write!(f, "Solution(escaped, {} walls)", self.num_walls())
        } else {
            write!(
                f,
                "Solution(score {}, {} walls)",
                self.score,
                self.num_walls()
            )
        }
    }
}

/// Renders a grid with a wall placement as an ASCII board.
///
/// Walls are drawn as `#` so they remain distinguishable from pre-existing
/// map walls (`W`). The origin, water, rewards, and teleport channels use
/// the same symbols the map loader accepts.
pub fn render_board(grid: &GridModel, placement: &Placement) -> String {
    let mut out = String::with_capacity(grid.num_cells() + grid.rows());
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let cell = grid.cell_at(row, col);
            let symbol = if cell == grid.origin() {
                'H'
            } else if placement.contains(cell) {
                '#'
            } else if grid.is_water(cell) {
                '~'
            } else if grid.is_reward(cell) {
                'C'
            } else if let Some(channel) = grid.channel(cell) {
                channel_symbol(channel.get())
            } else {
                '.'
            };
            out.push(symbol);
        }
        out.push('\n');
    }
    out
}

fn channel_symbol(channel: usize) -> char {
    if channel < 10 {
        (b'0' + channel as u8) as char
    } else if channel < 36 {
        (b'a' + (channel - 10) as u8) as char
    } else {
        '?'
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridBuilder, Terrain};
    use crate::index::ChannelIndex;

    #[test]
    fn test_placement_canonical_order() {
        let a = Placement::new(vec![
            CellIndex::new(5),
            CellIndex::new(1),
            CellIndex::new(5),
            CellIndex::new(3),
        ]);
        let b = Placement::new(vec![CellIndex::new(3), CellIndex::new(1), CellIndex::new(5)]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        assert!(a.contains(CellIndex::new(3)));
        assert!(!a.contains(CellIndex::new(2)));
    }

    #[test]
    fn test_with_cell() {
        let base = Placement::new(vec![CellIndex::new(4)]);
        let extended = base.with_cell(CellIndex::new(2));
        assert_eq!(base.len(), 1);
        assert_eq!(extended.cells(), &[CellIndex::new(2), CellIndex::new(4)]);

        // Adding an existing cell is a no-op.
        assert_eq!(extended.with_cell(CellIndex::new(4)), extended);
    }

    #[test]
    fn test_solution_accessors() {
        let solution = Solution::new(Placement::new(vec![CellIndex::new(1)]), 7, false);
        assert_eq!(solution.score(), 7);
        assert!(!solution.escaped());
        assert_eq!(solution.num_walls(), 1);
    }

    #[test]
    #[should_panic]
    fn test_escaped_solution_must_have_zero_score() {
        let _ = Solution::new(Placement::empty(), 3, true);
    }

    #[test]
    fn test_render_board() {
        let mut builder = GridBuilder::new(3, 4);
        builder.set_origin(builder.cell_at(1, 1));
        builder.set_terrain(builder.cell_at(0, 0), Terrain::Water);
        builder.set_reward(builder.cell_at(2, 3), true);
        builder.set_channel(builder.cell_at(0, 3), ChannelIndex::new(0));
        builder.set_channel(builder.cell_at(2, 0), ChannelIndex::new(0));
        let grid = builder.build().unwrap();

        let placement = Placement::new(vec![grid.cell_at(1, 2)]);
        let board = render_board(&grid, &placement);
        assert_eq!(board, "~..0\n.H#.\n0..C\n");
    }
}
