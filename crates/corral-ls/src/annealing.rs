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

//! # Simulated Annealing
//!
//! Local search over fixed-size placements: the state is always exactly
//! `min(budget, candidates)` walls, a move swaps one wall for an unused
//! candidate, and acceptance follows the Metropolis rule under a pluggable
//! [`CoolingSchedule`].
//!
//! ## Fitness
//!
//! The objective is discontinuous: escaped placements all score zero. To
//! give the walk a gradient, escaped states are ranked by the negated
//! reachable area (fewer reachable cells is closer to an enclosure) while
//! enclosed states rank by their actual score. Every enclosed state beats
//! every escaped one.
//!
//! ## Usage
//!
//! ```rust
//! use corral_ls::annealing::{GeometricCooling, SimulatedAnnealing};
//! use corral_model::parse_map;
//! use corral_reach::candidates::{candidates, frontier_ordering, CandidatePolicy};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let parsed = parse_map(".....\n..H..\n.....\n", 2).unwrap();
//! let mut cells = candidates(&parsed.grid, &CandidatePolicy::default());
//! frontier_ordering(&parsed.grid, &mut cells);
//!
//! let schedule = GeometricCooling::new(10.0, 0.95);
//! let rng = StdRng::seed_from_u64(7);
//! let mut solver = SimulatedAnnealing::new(schedule, rng).with_iterations(200);
//! let solution = solver.solve(&parsed.grid, &cells);
//! assert!(solution.num_walls() <= 2);
//! ```

use corral_model::{
    grid::GridModel,
    index::CellIndex,
    rules::ScoreRules,
    solution::{Placement, Solution},
};
use corral_reach::engine::{Evaluation, ReachabilityEngine};
use rand::{seq::SliceRandom, Rng};

/// Temperature control for the Metropolis acceptance rule.
pub trait CoolingSchedule {
    /// Resets the schedule to its starting temperature.
    fn on_start(&mut self);
    /// Advances the schedule by one iteration.
    fn update(&mut self);
    /// The current temperature.
    fn current(&self) -> f64;
    /// Returns `true` once the temperature is too low to accept any
    /// worsening move; the search stops early.
    fn is_frozen(&self) -> bool;
}

/// Multiplies the temperature by a fixed factor every iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricCooling {
    initial: f64,
    alpha: f64,
    floor: f64,
    current: f64,
}

impl GeometricCooling {
    /// Creates a schedule starting at `initial` and cooling by `alpha`
    /// per iteration, frozen below `1e-3`.
    ///
    /// # Panics
    ///
    /// Panics if `initial` is not positive or `alpha` is outside `(0, 1)`.
    pub fn new(initial: f64, alpha: f64) -> Self {
        assert!(initial > 0.0, "initial temperature must be positive");
        assert!(0.0 < alpha && alpha < 1.0, "alpha must be in (0, 1)");
        Self {
            initial,
            alpha,
            floor: 1e-3,
            current: initial,
        }
    }
}

impl CoolingSchedule for GeometricCooling {
    #[inline]
    fn on_start(&mut self) {
        self.current = self.initial;
    }

    #[inline]
    fn update(&mut self) {
        self.current *= self.alpha;
    }

    #[inline]
    fn current(&self) -> f64 {
        self.current
    }

    #[inline]
    fn is_frozen(&self) -> bool {
        self.current < self.floor
    }
}

/// Subtracts a fixed step from the temperature every iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearCooling {
    initial: f64,
    step: f64,
    current: f64,
}

impl LinearCooling {
    /// Creates a schedule starting at `initial` and cooling by `step` per
    /// iteration, frozen at zero.
    ///
    /// # Panics
    ///
    /// Panics if `initial` or `step` is not positive.
    pub fn new(initial: f64, step: f64) -> Self {
        assert!(initial > 0.0, "initial temperature must be positive");
        assert!(step > 0.0, "step must be positive");
        Self {
            initial,
            step,
            current: initial,
        }
    }
}

impl CoolingSchedule for LinearCooling {
    #[inline]
    fn on_start(&mut self) {
        self.current = self.initial;
    }

    #[inline]
    fn update(&mut self) {
        self.current = (self.current - self.step).max(0.0);
    }

    #[inline]
    fn current(&self) -> f64 {
        self.current
    }

    #[inline]
    fn is_frozen(&self) -> bool {
        self.current <= 0.0
    }
}

const DEFAULT_ITERATIONS: usize = 10_000;

/// Swap-move simulated annealing over fixed-size placements.
#[derive(Debug, Clone)]
pub struct SimulatedAnnealing<R, C>
where
    R: Rng,
    C: CoolingSchedule,
{
    engine: ReachabilityEngine,
    schedule: C,
    rng: R,
    iterations: usize,
}

impl<R, C> SimulatedAnnealing<R, C>
where
    R: Rng,
    C: CoolingSchedule,
{
    /// Creates a solver with the default scoring rules.
    #[inline]
    pub fn new(schedule: C, rng: R) -> Self {
        Self {
            engine: ReachabilityEngine::new(),
            schedule,
            rng,
            iterations: DEFAULT_ITERATIONS,
        }
    }

    /// Sets the scoring rules.
    #[inline]
    pub fn with_rules(mut self, rules: ScoreRules) -> Self {
        self.engine = ReachabilityEngine::with_rules(rules);
        self
    }

    /// Sets the iteration bound.
    #[inline]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Ranks an evaluation: enclosed states by score, escaped states by
    /// negated reachable area. `i64::MIN` never occurs, so every state
    /// beats an uninitialized best.
    #[inline]
    fn fitness(eval: &Evaluation) -> i64 {
        if eval.escaped() {
            -(eval.num_visited() as i64)
        } else {
            eval.score()
        }
    }

    /// Runs the annealing walk and returns the best placement visited.
    pub fn solve(&mut self, grid: &GridModel, candidates: &[CellIndex]) -> Solution {
        let k = grid.budget().min(candidates.len());

        let mut pool: Vec<CellIndex> = candidates.to_vec();
        pool.shuffle(&mut self.rng);
        let mut walls: Vec<CellIndex> = pool.split_off(pool.len() - k);

        let eval = self.engine.evaluate(grid, &Placement::new(walls.clone()));
        let mut current_fitness = Self::fitness(&eval);
        let mut best_walls = walls.clone();
        let mut best_fitness = current_fitness;

        self.schedule.on_start();
        if !pool.is_empty() && k > 0 {
            for _ in 0..self.iterations {
                if self.schedule.is_frozen() {
                    break;
                }

                let wall_index = self.rng.gen_range(0..walls.len());
                let pool_index = self.rng.gen_range(0..pool.len());
                std::mem::swap(&mut walls[wall_index], &mut pool[pool_index]);

                let eval = self.engine.evaluate(grid, &Placement::new(walls.clone()));
                let candidate_fitness = Self::fitness(&eval);
                let delta = candidate_fitness - current_fitness;

                let accept = delta >= 0
                    || self.rng.gen::<f64>() < (delta as f64 / self.schedule.current()).exp();
                if accept {
                    current_fitness = candidate_fitness;
                    if candidate_fitness > best_fitness {
                        best_fitness = candidate_fitness;
                        best_walls.clone_from(&walls);
                    }
                } else {
                    // Undo the swap.
                    std::mem::swap(&mut walls[wall_index], &mut pool[pool_index]);
                }

                self.schedule.update();
            }
        }

        let placement = Placement::new(best_walls);
        let eval = self.engine.evaluate(grid, &placement);
        Solution::new(placement, eval.score(), eval.escaped())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corral_model::grid::{GridBuilder, Terrain};
    use corral_reach::candidates::{candidates, frontier_ordering, CandidatePolicy};
    use rand::{rngs::StdRng, SeedableRng};

    fn ordered_candidates(grid: &GridModel) -> Vec<CellIndex> {
        let mut cells = candidates(grid, &CandidatePolicy::default());
        frontier_ordering(grid, &mut cells);
        cells
    }

    #[test]
    fn test_geometric_cooling_freezes() {
        let mut schedule = GeometricCooling::new(1.0, 0.5);
        assert!(!schedule.is_frozen());
        for _ in 0..20 {
            schedule.update();
        }
        assert!(schedule.is_frozen());
        schedule.on_start();
        assert!(!schedule.is_frozen());
        assert_eq!(schedule.current(), 1.0);
    }

    #[test]
    fn test_linear_cooling_freezes() {
        let mut schedule = LinearCooling::new(1.0, 0.25);
        for _ in 0..4 {
            assert!(!schedule.is_frozen());
            schedule.update();
        }
        assert!(schedule.is_frozen());
        assert_eq!(schedule.current(), 0.0);
    }

    #[test]
    #[should_panic]
    fn test_geometric_cooling_rejects_bad_alpha() {
        let _ = GeometricCooling::new(1.0, 1.5);
    }

    #[test]
    fn test_annealing_respects_the_budget() {
        let mut builder = GridBuilder::new(5, 5);
        builder.set_origin(builder.cell_at(2, 2));
        builder.set_budget(3);
        let grid = builder.build().unwrap();
        let cells = ordered_candidates(&grid);

        let mut solver = SimulatedAnnealing::new(
            GeometricCooling::new(5.0, 0.99),
            StdRng::seed_from_u64(42),
        )
        .with_iterations(300);
        let solution = solver.solve(&grid, &cells);
        assert!(solution.num_walls() <= 3);
    }

    #[test]
    fn test_annealing_never_beats_the_optimum() {
        // The only enclosure with four walls on an open 5x5 grid scores 1.
        let mut builder = GridBuilder::new(5, 5);
        builder.set_origin(builder.cell_at(2, 2));
        builder.set_budget(4);
        let grid = builder.build().unwrap();
        let cells = ordered_candidates(&grid);

        let mut solver = SimulatedAnnealing::new(
            GeometricCooling::new(5.0, 0.999),
            StdRng::seed_from_u64(7),
        )
        .with_iterations(2_000);
        let solution = solver.solve(&grid, &cells);
        assert!(solution.score() <= 1);
    }

    #[test]
    fn test_annealing_finds_the_single_gap() {
        // A water ring with one gap: the only candidate is the gap itself,
        // so the initial placement already encloses the origin.
        let mut builder = GridBuilder::new(5, 5);
        builder.set_origin(builder.cell_at(2, 2));
        for (row, col) in [(1, 1), (1, 2), (1, 3), (2, 1), (3, 1), (3, 2), (3, 3)] {
            builder.set_terrain(builder.cell_at(row, col), Terrain::Water);
        }
        for row in 0..5 {
            for col in 0..5 {
                let on_ring = (1..=3).contains(&row) && (1..=3).contains(&col);
                if !on_ring {
                    builder.set_terrain(builder.cell_at(row, col), Terrain::Water);
                }
            }
        }
        builder.set_budget(1);
        let grid = builder.build().unwrap();
        let cells = ordered_candidates(&grid);
        assert_eq!(cells, vec![grid.cell_at(2, 3)]);

        let mut solver = SimulatedAnnealing::new(
            LinearCooling::new(1.0, 0.01),
            StdRng::seed_from_u64(1),
        );
        let solution = solver.solve(&grid, &cells);
        assert!(!solution.escaped());
        assert_eq!(solution.score(), 1);
        assert_eq!(solution.placement().cells(), &[grid.cell_at(2, 3)]);
    }

    #[test]
    fn test_annealing_is_deterministic_for_a_fixed_seed() {
        let mut builder = GridBuilder::new(5, 6);
        builder.set_origin(builder.cell_at(2, 2));
        builder.set_budget(4);
        let grid = builder.build().unwrap();
        let cells = ordered_candidates(&grid);

        let run = || {
            let mut solver = SimulatedAnnealing::new(
                GeometricCooling::new(5.0, 0.99),
                StdRng::seed_from_u64(99),
            )
            .with_iterations(400);
            solver.solve(&grid, &cells)
        };
        assert_eq!(run(), run());
    }
}
