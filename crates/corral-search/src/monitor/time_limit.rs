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

//! # Time Limit Monitor
//!
//! A lightweight monitor that enforces a wall-clock time budget on the
//! search. It periodically checks elapsed time (using a bitmask-based step
//! filter) and requests termination once the configured `Duration` has
//! been exceeded.
//!
//! ## Motivation
//!
//! Exact search can be compute-intensive. The anytime solve mode needs
//! predictable time-bounded behavior. This monitor provides a low-overhead
//! way to cap runtime without checking the clock at every node.
//!
//! ## Highlights
//!
//! - Bitmask-driven clock checks: `(steps & clock_check_mask) == 0`
//!   triggers a check. The default mask (`0x3FFF`) checks approximately
//!   every 16,384 steps.
//! - `on_step()` uses `wrapping_add` to increment steps at minimal cost.
//! - `search_command()` returns `Terminate("time limit reached")` once
//!   elapsed time exceeds the limit at a check point; otherwise `Continue`.
//! - Constructors: `new(time_limit)` and
//!   `with_clock_check_mask(time_limit, mask)`.

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use corral_model::{grid::GridModel, solution::Solution};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor {
    clock_check_mask: u64,
    steps: u64,
    time_limit: std::time::Duration,
    start_time: std::time::Instant,
}

impl TimeLimitMonitor {
    /// Default mask: Check every 16,384 steps (2^14).
    /// 16384 - 1 = 16383 = 0x3FFF
    const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0x3FFF;

    #[inline]
    pub fn new(time_limit: std::time::Duration) -> Self {
        Self {
            clock_check_mask: Self::DEFAULT_STEP_CLOCK_CHECK_MASK,
            steps: 0,
            time_limit,
            start_time: std::time::Instant::now(),
        }
    }

    #[inline]
    pub fn with_clock_check_mask(time_limit: std::time::Duration, clock_check_mask: u64) -> Self {
        Self {
            clock_check_mask,
            steps: 0,
            time_limit,
            start_time: std::time::Instant::now(),
        }
    }
}

impl SearchMonitor for TimeLimitMonitor {
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _grid: &GridModel) {
        self.start_time = std::time::Instant::now();
        self.steps = 0;
    }

    fn on_exit_search(&mut self) {}

    fn on_solution_found(&mut self, _solution: &Solution) {}

    #[inline(always)]
    fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if (self.steps & self.clock_check_mask) == 0 && self.start_time.elapsed() >= self.time_limit
        {
            return SearchCommand::Terminate("time limit reached".to_string());
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_default_mask_is_power_of_two_minus_one() {
        assert_eq!(TimeLimitMonitor::DEFAULT_STEP_CLOCK_CHECK_MASK, 0x3FFF);
    }

    #[test]
    fn test_terminates_after_time_limit_when_mask_condition_met() {
        let mut mon = TimeLimitMonitor::new(Duration::from_millis(10));
        // Make elapsed exceed the limit by moving the start sufficiently
        // into the past.
        mon.start_time = Instant::now() - Duration::from_millis(50);

        // steps = 0 => (steps & mask) == 0, so the clock check runs
        mon.steps = 0;
        match mon.search_command() {
            SearchCommand::Terminate(msg) => {
                assert!(msg.contains("time limit"), "unexpected message: {msg}");
            }
            other => panic!("expected Terminate, got {:?}", other),
        }
    }

    #[test]
    fn test_continues_when_mask_condition_not_met_even_if_time_exceeded() {
        let mut mon = TimeLimitMonitor::new(Duration::from_millis(1));
        mon.start_time = Instant::now() - Duration::from_millis(50);

        // With default mask 0x3FFF, nonzero low bits skip the check.
        mon.steps = 1;
        match mon.search_command() {
            SearchCommand::Continue => {}
            other => panic!("expected Continue, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_mask_zero_always_checks() {
        let mut mon = TimeLimitMonitor::with_clock_check_mask(Duration::from_millis(1), 0);
        mon.start_time = Instant::now() - Duration::from_millis(50);

        mon.steps = 12345;
        match mon.search_command() {
            SearchCommand::Terminate(_) => {}
            other => panic!("expected Terminate due to exceeded time, got {:?}", other),
        }
    }

    #[test]
    fn test_continues_before_time_limit() {
        let mon = TimeLimitMonitor::new(Duration::from_secs(1000));
        match mon.search_command() {
            SearchCommand::Continue => {}
            other => panic!("expected Continue, got {:?}", other),
        }
    }
}
