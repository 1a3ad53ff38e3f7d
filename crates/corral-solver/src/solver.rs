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

//! # Solve Facade
//!
//! One entry point over the whole pipeline: candidate enumeration, greedy
//! incumbent seeding, and exact branch-and-bound, serial or parallel.
//!
//! ## Motivation
//!
//! Callers should not have to wire monitors, incumbents, and workers by
//! hand for the common cases. The facade covers two of them:
//!
//! - [`SolveMode::Exhaustive`]: run to optimality, however long it takes.
//! - [`SolveMode::Anytime`]: run under [`SolveLimits`] (wall time and/or
//!   node count) and return the best incumbent when a limit fires. The
//!   greedy seed guarantees there is always an incumbent to return.
//!
//! ## Usage
//!
//! ```rust
//! use corral_model::parse_map;
//! use corral_solver::solver::{SolveMode, SolverBuilder};
//!
//! let parsed = parse_map(".....\n.....\n..H..\n.....\n.....\n", 4).unwrap();
//! let solver = SolverBuilder::new().with_threads(2).build();
//! let outcome = solver.solve(&parsed.grid, SolveMode::Exhaustive);
//! assert!(outcome.is_optimal());
//! assert_eq!(outcome.solution().score(), 1);
//! ```

use corral_bnb::{
    monitor::wrapper::WrapperMonitor, BnbSolver, BnbSolverOutcome, ParallelBnbSolver,
};
use corral_ls::greedy::GreedySolver;
use corral_model::{
    grid::GridModel,
    rules::ScoreRules,
    solution::{Placement, Solution},
};
use corral_reach::candidates::{candidates, frontier_ordering, CandidatePolicy};
use corral_search::{
    incumbent::SharedIncumbent,
    monitor::{
        composite::CompositeMonitor, node_limit::NodeLimitMonitor, time_limit::TimeLimitMonitor,
    },
    result::{SolverOutcome, SolverResult, TerminationReason},
    stats::SolverStatisticsBuilder,
};
use std::sync::atomic::AtomicU64;
use std::time::Duration;

/// Resource limits for an anytime solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveLimits {
    /// Wall-clock limit for the whole solve.
    pub time_limit: Option<Duration>,
    /// Limit on the total nodes explored across all workers.
    pub node_limit: Option<u64>,
}

impl SolveLimits {
    /// No limits at all.
    #[inline]
    pub fn none() -> Self {
        Self::default()
    }

    /// Sets the wall-clock limit.
    #[inline]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Sets the node limit.
    #[inline]
    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = Some(node_limit);
        self
    }
}

/// How long the exact search is allowed to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveMode {
    /// Run to proven optimality.
    Exhaustive,
    /// Run under limits; the best incumbent is returned when one fires.
    Anytime(SolveLimits),
}

/// The configured solve pipeline. Build one with [`SolverBuilder`].
#[derive(Debug, Clone)]
pub struct Solver {
    num_threads: usize,
    policy: CandidatePolicy,
    rules: ScoreRules,
}

impl Default for Solver {
    fn default() -> Self {
        SolverBuilder::new().build()
    }
}

impl Solver {
    /// Number of worker threads the exact search will use.
    #[inline]
    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// The candidate policy in effect.
    #[inline]
    pub fn policy(&self) -> CandidatePolicy {
        self.policy
    }

    /// The scoring rules in effect.
    #[inline]
    pub fn rules(&self) -> ScoreRules {
        self.rules
    }

    /// Runs the full pipeline on the grid.
    ///
    /// The greedy heuristic seeds the incumbent first, so even an
    /// immediately-expiring anytime solve returns a solution. An instance
    /// with no possible enclosure yields the empty placement scored as
    /// escaped, reported as optimal once the tree is exhausted.
    pub fn solve(&self, grid: &GridModel, mode: SolveMode) -> SolverOutcome {
        let start = std::time::Instant::now();
        let limits = match mode {
            SolveMode::Exhaustive => SolveLimits::none(),
            SolveMode::Anytime(limits) => limits,
        };

        let mut cells = candidates(grid, &self.policy);
        frontier_ordering(grid, &mut cells);

        let incumbent = SharedIncumbent::new();
        let seed = GreedySolver::with_rules(self.rules).solve(grid, &cells);
        let seeded = incumbent.try_install(&seed);

        let outcome = if self.num_threads > 1 {
            self.solve_parallel(grid, &cells, &incumbent, &limits)
        } else {
            self.solve_serial(grid, &cells, &incumbent, &limits)
        };

        let bnb_stats = outcome.statistics();
        let mut solutions_found = bnb_stats.solutions_found;
        if seeded {
            solutions_found += 1;
        }
        let statistics = SolverStatisticsBuilder::new()
            .solutions_found(solutions_found)
            .nodes_explored(bnb_stats.nodes_explored)
            .evaluations(bnb_stats.evaluations)
            .used_threads(self.num_threads)
            .solve_duration(start.elapsed())
            .build();

        // The incumbent is the source of truth: it holds the greedy seed
        // and every improvement the exact search installed.
        let solution = incumbent
            .snapshot()
            .unwrap_or_else(|| Solution::new(Placement::empty(), 0, true));
        match outcome.termination_reason() {
            TerminationReason::OptimalityProven => SolverOutcome::new(
                SolverResult::Optimal(solution),
                TerminationReason::OptimalityProven,
                statistics,
            ),
            TerminationReason::Aborted(msg) => SolverOutcome::new(
                SolverResult::Feasible(solution),
                TerminationReason::Aborted(msg.clone()),
                statistics,
            ),
        }
    }

    fn solve_serial(
        &self,
        grid: &GridModel,
        cells: &[corral_model::index::CellIndex],
        incumbent: &SharedIncumbent,
        limits: &SolveLimits,
    ) -> BnbSolverOutcome {
        let nodes = AtomicU64::new(0);
        let mut composite = CompositeMonitor::new();
        composite.add_monitor(NodeLimitMonitor::new(&nodes, limits.node_limit));
        if let Some(time_limit) = limits.time_limit {
            composite.add_monitor(TimeLimitMonitor::new(time_limit));
        }
        let monitor = WrapperMonitor::new(&mut composite);

        let mut solver = BnbSolver::with_rules(self.rules);
        solver.solve_with_incumbent(grid, cells, monitor, incumbent)
    }

    fn solve_parallel(
        &self,
        grid: &GridModel,
        cells: &[corral_model::index::CellIndex],
        incumbent: &SharedIncumbent,
        limits: &SolveLimits,
    ) -> BnbSolverOutcome {
        let mut parallel = ParallelBnbSolver::new(self.num_threads).with_rules(self.rules);
        if let Some(time_limit) = limits.time_limit {
            parallel = parallel.with_time_limit(time_limit);
        }
        if let Some(node_limit) = limits.node_limit {
            parallel = parallel.with_node_limit(node_limit);
        }
        parallel.solve(grid, cells, incumbent)
    }
}

/// Returns `true` if the outcome's score equals a known reference score,
/// e.g. a puzzle's published optimum.
#[inline]
pub fn matches_reference(outcome: &SolverOutcome, reference_score: i64) -> bool {
    outcome.solution().score() == reference_score
}

/// Builder for [`Solver`] with permissive defaults: one thread, default
/// candidate policy, default scoring rules.
#[derive(Debug, Clone)]
pub struct SolverBuilder {
    num_threads: usize,
    policy: CandidatePolicy,
    rules: ScoreRules,
}

impl Default for SolverBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl SolverBuilder {
    #[inline]
    pub fn new() -> Self {
        Self {
            num_threads: 1,
            policy: CandidatePolicy::default(),
            rules: ScoreRules::default(),
        }
    }

    /// Sets the number of worker threads for the exact search.
    #[inline]
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        debug_assert!(
            num_threads > 0,
            "called `SolverBuilder::with_threads` with zero threads"
        );
        self.num_threads = num_threads;
        self
    }

    /// Sets the candidate policy.
    #[inline]
    pub fn with_policy(mut self, policy: CandidatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the scoring rules.
    #[inline]
    pub fn with_rules(mut self, rules: ScoreRules) -> Self {
        self.rules = rules;
        self
    }

    #[inline]
    pub fn build(self) -> Solver {
        Solver {
            num_threads: self.num_threads,
            policy: self.policy,
            rules: self.rules,
        }
    }
}
