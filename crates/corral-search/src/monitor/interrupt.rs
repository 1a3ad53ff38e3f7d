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

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use corral_model::{grid::GridModel, solution::Solution};
use std::sync::atomic::AtomicBool;

/// A search monitor that checks an atomic boolean flag to determine
/// whether the search should be interrupted.
///
/// Worker threads in a parallel search share one flag; whichever thread
/// stops first raises it and the rest drain out at their next check.
#[derive(Debug, Clone)]
pub struct InterruptMonitor<'a> {
    stop_flag: &'a AtomicBool,
}

impl<'a> InterruptMonitor<'a> {
    /// Creates a new `InterruptMonitor` that monitors the given atomic boolean flag.
    /// The search will be terminated if the flag is set to `true`.
    #[inline(always)]
    pub fn new(stop_flag: &'a AtomicBool) -> Self {
        Self { stop_flag }
    }
}

impl SearchMonitor for InterruptMonitor<'_> {
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn on_enter_search(&mut self, _grid: &GridModel) {}
    fn on_exit_search(&mut self) {}
    fn on_solution_found(&mut self, _solution: &Solution) {}
    fn on_step(&mut self) {}

    fn search_command(&self) -> SearchCommand {
        if self.stop_flag.load(std::sync::atomic::Ordering::Relaxed) {
            SearchCommand::Terminate("Interrupt signal received".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::InterruptMonitor;
    use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_interrupt_monitor_continues_when_flag_is_clear() {
        let flag = AtomicBool::new(false);
        let monitor = InterruptMonitor::new(&flag);

        match monitor.search_command() {
            SearchCommand::Continue => {}
            other => panic!("expected Continue, got {:?}", other),
        }
    }

    #[test]
    fn test_interrupt_monitor_terminates_when_flag_is_set() {
        let flag = AtomicBool::new(false);
        let monitor = InterruptMonitor::new(&flag);

        flag.store(true, Ordering::Relaxed);

        match monitor.search_command() {
            SearchCommand::Terminate(reason) => {
                assert_eq!(reason, "Interrupt signal received");
            }
            other => panic!("expected Terminate, got {:?}", other),
        }
    }
}
