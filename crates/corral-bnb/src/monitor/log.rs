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

use crate::monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor};
use crate::stats::BnbSolverStatistics;
use corral_model::{grid::GridModel, solution::Solution};
use std::time::{Duration, Instant};

/// Periodically prints a progress table while the search runs.
///
/// Checking the clock on every node is wasteful, so the monitor only
/// consults it when `nodes_explored & clock_check_mask == 0` and then
/// logs if at least `log_interval` has passed since the last line.
#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_score: Option<i64>,
    last_bound: i64,
    last_depth: usize,
}

impl LogTreeSearchMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_score: None,
            last_bound: 0,
            last_depth: 0,
        }
    }

    #[inline(always)]
    fn print_header(&self) {
        println!(
            "{:<9} | {:<14} | {:<7} | {:<14} | {:<14} | {:<13} | {:<13}",
            "Elapsed", "Nodes", "Depth", "Best Score", "Current Bound", "Pruned (Bound)", "Enclosed"
        );
        println!("{}", "-".repeat(102));
    }

    #[inline(always)]
    fn log_line(&mut self, stats: &BnbSolverStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let best_score_str = if let Some(score) = self.best_score {
            format!("{}", score)
        } else {
            "None".to_string()
        };

        let elapsed_field = format!("{:.1}s", elapsed);

        println!(
            "{:<9} | {:<14} | {:<7} | {:<14} | {:<14} | {:<13} | {:<13}",
            elapsed_field,
            stats.nodes_explored,
            self.last_depth,
            best_score_str,
            self.last_bound,
            stats.prunings_bound,
            stats.subtrees_enclosed
        );

        self.last_log_time = now;
    }
}

impl Default for LogTreeSearchMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl std::fmt::Display for LogTreeSearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl TreeSearchMonitor for LogTreeSearchMonitor {
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, _grid: &GridModel, _statistics: &BnbSolverStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_score = None; // Reset
        self.print_header();
    }

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {
        println!("{}", "-".repeat(102));
        println!("Search finished.");
    }

    fn on_step(&mut self, stats: &BnbSolverStatistics) {
        if (stats.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(stats);
        }
    }

    fn on_bound_computed(&mut self, depth: usize, bound: i64, _statistics: &BnbSolverStatistics) {
        self.last_depth = depth;
        self.last_bound = bound;
    }

    fn on_prune(&mut self, _reason: PruneReason, _statistics: &BnbSolverStatistics) {}

    fn on_decisions_enqueued(&mut self, _count: usize, _statistics: &BnbSolverStatistics) {}

    fn on_solution_found(&mut self, solution: &Solution, _statistics: &BnbSolverStatistics) {
        self.best_score = Some(solution.score());
    }
}
