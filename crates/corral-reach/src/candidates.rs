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

//! # Candidate Wall Enumeration
//!
//! Determines which cells a wall may legally be placed on and in which
//! order the exact solver should branch on them.
//!
//! Water and the origin are never wall sites. Reward and teleport cells
//! are protected by default, matching the game rules, but the policy can
//! open them up for variants that allow paving over either.

use corral_model::{CellIndex, GridModel};

/// Which protected cell classes stay off-limits for walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CandidatePolicy {
    /// Keep reward cells wall-free.
    pub protect_rewards: bool,
    /// Keep teleport cells wall-free.
    pub protect_portals: bool,
}

impl Default for CandidatePolicy {
    #[inline]
    fn default() -> Self {
        Self {
            protect_rewards: true,
            protect_portals: true,
        }
    }
}

/// Enumerates all legal wall positions in ascending row-major order.
///
/// Water and the origin are always excluded; rewards and teleports follow
/// the policy.
pub fn candidates(grid: &GridModel, policy: &CandidatePolicy) -> Vec<CellIndex> {
    grid.cells()
        .filter(|&cell| {
            cell != grid.origin()
                && !grid.is_water(cell)
                && (!policy.protect_rewards || !grid.is_reward(cell))
                && (!policy.protect_portals || grid.channel(cell).is_none())
        })
        .collect()
}

/// Orders candidates by Manhattan distance from the origin, ties broken by
/// row-major index.
///
/// Cells close to the origin are the ones most likely to sit on every
/// escape route, so branching on them first lets the exact solver commit
/// to tight enclosures early and prune the rest. The ordering is a pure
/// function of the grid, which keeps parallel and serial searches on
/// identical trees.
pub fn frontier_ordering(grid: &GridModel, candidates: &mut [CellIndex]) {
    let (origin_row, origin_col) = grid.position(grid.origin());
    candidates.sort_by_key(|&cell| {
        let (row, col) = grid.position(cell);
        let distance = row.abs_diff(origin_row) + col.abs_diff(origin_col);
        (distance, cell.get())
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use corral_model::parse_map;

    #[test]
    fn test_candidates_exclude_protected_cells() {
        let parsed = parse_map("~C0\n.H.\n..0\n", 2).unwrap();
        let grid = &parsed.grid;
        let cells = candidates(grid, &CandidatePolicy::default());
        assert_eq!(
            cells,
            vec![
                grid.cell_at(1, 0),
                grid.cell_at(1, 2),
                grid.cell_at(2, 0),
                grid.cell_at(2, 1),
            ]
        );
    }

    #[test]
    fn test_policy_can_release_rewards_and_portals() {
        let parsed = parse_map("~C0\n.H.\n..0\n", 2).unwrap();
        let grid = &parsed.grid;
        let policy = CandidatePolicy {
            protect_rewards: false,
            protect_portals: false,
        };
        let cells = candidates(grid, &policy);
        // Everything except water and the origin.
        assert_eq!(cells.len(), 7);
        assert!(cells.contains(&grid.cell_at(0, 1)));
        assert!(cells.contains(&grid.cell_at(0, 2)));
        assert!(!cells.contains(&grid.cell_at(0, 0)));
        assert!(!cells.contains(&grid.origin()));
    }

    #[test]
    fn test_frontier_ordering_is_distance_then_row_major() {
        let parsed = parse_map(".....\n.....\n..H..\n.....\n.....\n", 2).unwrap();
        let grid = &parsed.grid;
        let mut cells = candidates(grid, &CandidatePolicy::default());
        frontier_ordering(grid, &mut cells);

        // The four orthogonal neighbors come first, in row-major order.
        assert_eq!(
            &cells[..4],
            &[
                grid.cell_at(1, 2),
                grid.cell_at(2, 1),
                grid.cell_at(2, 3),
                grid.cell_at(3, 2),
            ]
        );
        // Distances never decrease.
        let (origin_row, origin_col) = grid.position(grid.origin());
        let distances: Vec<_> = cells
            .iter()
            .map(|&cell| {
                let (row, col) = grid.position(cell);
                row.abs_diff(origin_row) + col.abs_diff(origin_col)
            })
            .collect();
        assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
