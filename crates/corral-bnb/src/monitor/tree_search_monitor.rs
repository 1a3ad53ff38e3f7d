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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait and `PruneReason` for observing and
//! controlling branch-and-bound. Callbacks track the solver lifecycle, and a
//! monitor can influence execution via `SearchCommand` (default: Continue).
//!
//! Lifecycle highlights
//! - enter → step → {bound/prune | decisions enqueued} → solution → exit
//! - `BnbSolverStatistics` is provided to every callback for telemetry.
//!
//! Design notes
//! - Methods take `&mut self`; monitors are assumed single-threaded.
//! - Keep callbacks lightweight; avoid blocking I/O in hot paths.
//!
//! Integrates with the `log` and `no_op` monitors to mix and match logging,
//! metrics, and early stopping without touching core solver logic.

use crate::stats::BnbSolverStatistics;
use corral_model::{grid::GridModel, solution::Solution};
use corral_search::monitor::search_monitor::SearchCommand;

/// Reasons for pruning a search node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// The subtree is dominated by the current best score.
    BoundDominated,
    /// The node already encloses the agent; adding walls cannot improve it.
    Enclosed,
    /// No further wall can be placed (budget spent or no reachable candidate).
    Exhausted,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
            PruneReason::Enclosed => write!(f, "Enclosed"),
            PruneReason::Exhausted => write!(f, "Exhausted"),
        }
    }
}

/// Trait for monitoring and controlling the search process of the solver.
pub trait TreeSearchMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when the search starts.
    fn on_enter_search(&mut self, grid: &GridModel, statistics: &BnbSolverStatistics);
    /// Called when the search ends.
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics);
    /// Called to determine the next action of the search.
    fn search_command(&mut self, _statistics: &BnbSolverStatistics) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called at each step of the search.
    fn on_step(&mut self, statistics: &BnbSolverStatistics);
    /// Called when an upper bound is computed for a search node.
    /// `depth` is the number of walls placed along the node's branch,
    /// `bound` is the raw (pre-nullification) score of the node.
    fn on_bound_computed(&mut self, depth: usize, bound: i64, statistics: &BnbSolverStatistics);
    /// Called when a search node is pruned.
    fn on_prune(&mut self, reason: PruneReason, statistics: &BnbSolverStatistics);
    /// Called when child decisions are enqueued for exploration.
    fn on_decisions_enqueued(&mut self, count: usize, statistics: &BnbSolverStatistics);
    /// Called when a new solution is found.
    fn on_solution_found(&mut self, solution: &Solution, statistics: &BnbSolverStatistics);
}

impl std::fmt::Debug for dyn TreeSearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn TreeSearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}
