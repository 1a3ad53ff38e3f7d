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

//! # Greedy Escape Blocking
//!
//! Places walls one at a time until the agent is enclosed or the budget
//! runs out. At every step each remaining candidate is tried with one more
//! wall: a candidate that encloses the agent wins outright (best score
//! among enclosing candidates), otherwise the candidate that shrinks the
//! escaped reachable area the most is taken.
//!
//! The walk is deterministic for a fixed candidate order, always
//! terminates, and carries no optimality guarantee. Its real job is
//! seeding the exact search's incumbent with a decent lower bound.

use corral_model::{
    grid::GridModel,
    index::CellIndex,
    rules::ScoreRules,
    solution::{Placement, Solution},
};
use corral_reach::engine::ReachabilityEngine;

/// Wall-by-wall escape blocking heuristic.
#[derive(Debug, Clone)]
pub struct GreedySolver {
    engine: ReachabilityEngine,
}

impl Default for GreedySolver {
    fn default() -> Self {
        Self::new()
    }
}

impl GreedySolver {
    /// Creates a solver with the default scoring rules.
    #[inline]
    pub fn new() -> Self {
        Self::with_rules(ScoreRules::default())
    }

    /// Creates a solver with the given scoring rules.
    #[inline]
    pub fn with_rules(rules: ScoreRules) -> Self {
        Self {
            engine: ReachabilityEngine::with_rules(rules),
        }
    }

    /// Returns the scoring rules used by this solver.
    #[inline]
    pub fn rules(&self) -> ScoreRules {
        self.engine.rules()
    }

    /// Runs the greedy walk over the candidate ordering.
    ///
    /// Ties are broken by candidate order, so the result is deterministic
    /// for a fixed input.
    pub fn solve(&mut self, grid: &GridModel, candidates: &[CellIndex]) -> Solution {
        let mut remaining: Vec<CellIndex> = candidates.to_vec();
        let mut placement = Placement::empty();

        loop {
            let eval = self.engine.evaluate(grid, &placement);
            if !eval.escaped() {
                let score = eval.score();
                return Solution::new(placement, score, false);
            }
            if placement.len() == grid.budget() {
                return Solution::new(placement, 0, true);
            }

            // (score, index) of the best enclosing candidate, and
            // (area, index) of the best area-shrinking one.
            let mut best_enclosing: Option<(i64, usize)> = None;
            let mut best_open: Option<(usize, usize)> = None;

            for (index, &cell) in remaining.iter().enumerate() {
                // A wall outside the current closure changes nothing.
                if !eval.raw_reachable(cell) {
                    continue;
                }

                let trial = self.engine.evaluate(grid, &placement.with_cell(cell));
                if !trial.escaped() {
                    if best_enclosing.map_or(true, |(score, _)| trial.score() > score) {
                        best_enclosing = Some((trial.score(), index));
                    }
                } else if best_enclosing.is_none() {
                    let area = trial.num_visited();
                    if best_open.map_or(true, |(best_area, _)| area < best_area) {
                        best_open = Some((area, index));
                    }
                }
            }

            let pick = best_enclosing
                .map(|(_, index)| index)
                .or(best_open.map(|(_, index)| index));
            match pick {
                Some(index) => {
                    let cell = remaining.remove(index);
                    placement = placement.with_cell(cell);
                }
                // Every remaining candidate is outside the closure; more
                // walls cannot change anything.
                None => return Solution::new(placement, 0, true),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corral_model::grid::{GridBuilder, Terrain};
    use corral_reach::candidates::{candidates, frontier_ordering, CandidatePolicy};

    fn ordered_candidates(grid: &GridModel) -> Vec<CellIndex> {
        let mut cells = candidates(grid, &CandidatePolicy::default());
        frontier_ordering(grid, &mut cells);
        cells
    }

    #[test]
    fn test_greedy_encloses_the_origin_on_an_open_grid() {
        let mut builder = GridBuilder::new(5, 5);
        builder.set_origin(builder.cell_at(2, 2));
        builder.set_budget(4);
        let grid = builder.build().unwrap();
        let cells = ordered_candidates(&grid);

        let mut solver = GreedySolver::new();
        let solution = solver.solve(&grid, &cells);
        assert!(!solution.escaped());
        assert_eq!(solution.score(), 1);
        let expected = Placement::new(vec![
            grid.cell_at(1, 2),
            grid.cell_at(2, 1),
            grid.cell_at(2, 3),
            grid.cell_at(3, 2),
        ]);
        assert_eq!(*solution.placement(), expected);
    }

    #[test]
    fn test_greedy_respects_the_budget_when_failing() {
        let mut builder = GridBuilder::new(5, 5);
        builder.set_origin(builder.cell_at(2, 2));
        builder.set_budget(3);
        let grid = builder.build().unwrap();
        let cells = ordered_candidates(&grid);

        let mut solver = GreedySolver::new();
        let solution = solver.solve(&grid, &cells);
        // Three walls cannot enclose the center of an open grid.
        assert!(solution.escaped());
        assert_eq!(solution.score(), 0);
        assert!(solution.num_walls() <= 3);
    }

    #[test]
    fn test_greedy_uses_water_as_free_walls() {
        let mut builder = GridBuilder::new(4, 4);
        builder.set_origin(builder.cell_at(1, 1));
        builder.set_terrain(builder.cell_at(1, 2), Terrain::Water);
        builder.set_terrain(builder.cell_at(2, 1), Terrain::Water);
        builder.set_budget(2);
        let grid = builder.build().unwrap();
        let cells = ordered_candidates(&grid);

        let mut solver = GreedySolver::new();
        let solution = solver.solve(&grid, &cells);
        assert!(!solution.escaped());
        assert_eq!(solution.score(), 1);
    }

    #[test]
    fn test_greedy_never_beats_a_known_optimum() {
        let mut builder = GridBuilder::new(5, 5);
        builder.set_origin(builder.cell_at(2, 2));
        builder.set_reward(builder.cell_at(2, 3), true);
        builder.set_budget(6);
        let grid = builder.build().unwrap();
        let cells = ordered_candidates(&grid);

        let mut solver = GreedySolver::new();
        let solution = solver.solve(&grid, &cells);
        // Exhaustive search proves the optimum here is 5.
        assert!(solution.score() <= 5);
        assert!(solution.num_walls() <= 6);
    }

    #[test]
    fn test_greedy_gives_up_on_a_boundary_origin() {
        let mut builder = GridBuilder::new(5, 5);
        builder.set_origin(builder.cell_at(0, 2));
        builder.set_budget(8);
        let grid = builder.build().unwrap();
        let cells = ordered_candidates(&grid);

        let mut solver = GreedySolver::new();
        let solution = solver.solve(&grid, &cells);
        assert!(solution.escaped());
        assert_eq!(solution.score(), 0);
    }
}
