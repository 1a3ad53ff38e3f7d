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

//! Parallel branch-and-bound driver
//!
//! Splits the search tree at the root and distributes the subtrees over
//! scoped worker threads. The first `split_depth` branching decisions are
//! enumerated into up to `2^split_depth` [`SearchPrefix`]es (subsets that
//! exceed the wall budget are dropped); each worker runs a private
//! [`BnbSolver`] over its share of the prefixes, all pruning against one
//! [`SharedIncumbent`].
//!
//! Coordination
//! - One `AtomicBool` stop flag: any aborted worker raises it and the rest
//!   bail out at their next monitor check.
//! - One `AtomicU64` node counter backing a global node limit.
//! - Time limits are enforced per prefix with the remaining wall time.
//!
//! Workers are otherwise share-nothing; the final solution is read from
//! the incumbent after the scope joins.

use crate::{
    bnb::{BnbSolver, SearchPrefix},
    monitor::wrapper::WrapperMonitor,
    result::BnbSolverOutcome,
    stats::BnbSolverStatistics,
};
use corral_model::{
    grid::GridModel,
    index::CellIndex,
    rules::ScoreRules,
    solution::{Placement, Solution},
};
use corral_search::{
    incumbent::SharedIncumbent,
    monitor::{
        composite::CompositeMonitor, interrupt::InterruptMonitor, node_limit::NodeLimitMonitor,
        time_limit::TimeLimitMonitor,
    },
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Default number of root branching decisions fixed per prefix.
pub const DEFAULT_SPLIT_DEPTH: usize = 4;

/// A parallel driver around [`BnbSolver`]: root-prefix splitting over
/// scoped threads sharing one incumbent.
#[derive(Debug, Clone)]
pub struct ParallelBnbSolver {
    num_threads: usize,
    split_depth: usize,
    rules: ScoreRules,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
}

impl ParallelBnbSolver {
    /// Creates a driver using `num_threads` workers, the default split
    /// depth, default scoring rules, and no limits.
    #[inline]
    pub fn new(num_threads: usize) -> Self {
        debug_assert!(
            num_threads > 0,
            "called `ParallelBnbSolver::new` with zero threads"
        );
        Self {
            num_threads,
            split_depth: DEFAULT_SPLIT_DEPTH,
            rules: ScoreRules::default(),
            time_limit: None,
            node_limit: None,
        }
    }

    /// Sets the number of root decisions fixed per prefix. More depth means
    /// more, smaller subtrees and better load balance, at the cost of 2^n
    /// prefix evaluations.
    #[inline]
    pub fn with_split_depth(mut self, split_depth: usize) -> Self {
        debug_assert!(
            split_depth <= 16,
            "called `ParallelBnbSolver::with_split_depth` with excessive depth: {}",
            split_depth
        );
        self.split_depth = split_depth;
        self
    }

    /// Sets the scoring rules used by every worker.
    #[inline]
    pub fn with_rules(mut self, rules: ScoreRules) -> Self {
        self.rules = rules;
        self
    }

    /// Sets a wall-clock limit for the whole solve.
    #[inline]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Sets a limit on the total nodes explored across all workers.
    #[inline]
    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = Some(node_limit);
        self
    }

    /// Enumerates the root prefixes: every subset of the first `k`
    /// candidates that fits the budget, with `k` candidates decided.
    fn prefixes(&self, grid: &GridModel, candidates: &[CellIndex]) -> Vec<SearchPrefix> {
        let k = self.split_depth.min(candidates.len());
        let mut prefixes = Vec::with_capacity(1 << k);
        for mask in 0u32..(1u32 << k) {
            if (mask.count_ones() as usize) > grid.budget() {
                continue;
            }
            let walls: Vec<CellIndex> = (0..k)
                .filter(|&bit| mask & (1 << bit) != 0)
                .map(|bit| candidates[bit])
                .collect();
            prefixes.push(SearchPrefix::new(k, walls));
        }
        prefixes
    }

    /// Solves the grid over the candidate ordering, publishing every
    /// improvement to `incumbent` and reading the final solution from it.
    pub fn solve(
        &self,
        grid: &GridModel,
        candidates: &[CellIndex],
        incumbent: &SharedIncumbent,
    ) -> BnbSolverOutcome {
        let start = Instant::now();
        let prefixes = self.prefixes(grid, candidates);
        let num_workers = self.num_threads.min(prefixes.len()).max(1);

        let stop = AtomicBool::new(false);
        let nodes = AtomicU64::new(0);

        let worker_results: Vec<(BnbSolverStatistics, Option<String>)> =
            std::thread::scope(|scope| {
                let mut handles = Vec::with_capacity(num_workers);
                for worker in 0..num_workers {
                    let prefixes = &prefixes;
                    let stop = &stop;
                    let nodes = &nodes;
                    handles.push(scope.spawn(move || {
                        self.run_worker(grid, candidates, incumbent, prefixes, worker, stop, nodes, start)
                    }));
                }
                handles
                    .into_iter()
                    .map(|handle| handle.join().expect("worker thread panicked"))
                    .collect()
            });

        let mut stats = BnbSolverStatistics::default();
        let mut abort: Option<String> = None;
        for (worker_stats, worker_abort) in worker_results {
            stats.merge(&worker_stats);
            if abort.is_none() {
                abort = worker_abort;
            }
        }
        stats.set_total_time(start.elapsed());

        let solution = incumbent
            .snapshot()
            .unwrap_or_else(|| Solution::new(Placement::empty(), 0, true));
        match abort {
            None => BnbSolverOutcome::optimal(solution, stats),
            Some(msg) => BnbSolverOutcome::aborted(solution, msg, stats),
        }
    }

    /// One worker: a private solver run over every `num_workers`-th prefix.
    #[allow(clippy::too_many_arguments)]
    fn run_worker(
        &self,
        grid: &GridModel,
        candidates: &[CellIndex],
        incumbent: &SharedIncumbent,
        prefixes: &[SearchPrefix],
        worker: usize,
        stop: &AtomicBool,
        nodes: &AtomicU64,
        start: Instant,
    ) -> (BnbSolverStatistics, Option<String>) {
        let num_workers = self.num_threads.min(prefixes.len()).max(1);
        let mut solver = BnbSolver::with_rules(self.rules);
        let mut stats = BnbSolverStatistics::default();
        let mut abort: Option<String> = None;

        for prefix in prefixes.iter().skip(worker).step_by(num_workers) {
            if stop.load(Ordering::Relaxed) {
                break;
            }

            let mut composite = CompositeMonitor::new();
            composite.add_monitor(InterruptMonitor::new(stop));
            composite.add_monitor(NodeLimitMonitor::new(nodes, self.node_limit));
            if let Some(limit) = self.time_limit {
                match limit.checked_sub(start.elapsed()) {
                    Some(remaining) if !remaining.is_zero() => {
                        composite.add_monitor(TimeLimitMonitor::new(remaining));
                    }
                    _ => {
                        stop.store(true, Ordering::Relaxed);
                        abort = Some("time limit reached".to_string());
                        break;
                    }
                }
            }

            let monitor = WrapperMonitor::new(&mut composite);
            let outcome = solver.solve_with_prefix(grid, candidates, prefix, monitor, incumbent);
            stats.merge(outcome.statistics());

            if let corral_search::result::TerminationReason::Aborted(msg) =
                outcome.termination_reason()
            {
                stop.store(true, Ordering::Relaxed);
                abort = Some(msg.clone());
                break;
            }
        }

        (stats, abort)
    }
}
