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

//! # Node Limit Monitor
//!
//! A search monitor that tracks the number of explored nodes in a shared
//! `AtomicU64` counter, and optionally terminates the search when a
//! configured global limit is reached. Multiple monitors (one per worker
//! thread) can share the same counter to enforce a cross-thread limit.
//!
//! ## Usage
//!
//! ```rust
//! use corral_search::monitor::node_limit::NodeLimitMonitor;
//! use corral_search::monitor::search_monitor::{SearchCommand, SearchMonitor};
//! use std::sync::atomic::AtomicU64;
//!
//! let global_count = AtomicU64::new(0);
//! let mut monitor = NodeLimitMonitor::with_limit(&global_count, 3);
//!
//! monitor.on_step();
//! monitor.on_step();
//! monitor.on_step();
//! assert!(matches!(monitor.search_command(), SearchCommand::Terminate(_)));
//! ```

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use corral_model::{grid::GridModel, solution::Solution};
use std::sync::atomic::{AtomicU64, Ordering};

/// A monitor that terminates the search when a specified number of nodes
/// has been explored, or continues indefinitely if no limit is set, just
/// updating the shared node count.
#[derive(Debug)]
pub struct NodeLimitMonitor<'a> {
    nodes_explored: &'a AtomicU64,
    node_limit: Option<u64>,
}

impl<'a> NodeLimitMonitor<'a> {
    /// Creates a new `NodeLimitMonitor`.
    #[inline]
    pub fn new(nodes_explored: &'a AtomicU64, node_limit: Option<u64>) -> Self {
        Self {
            nodes_explored,
            node_limit,
        }
    }

    /// Creates a new `NodeLimitMonitor` with a specified node limit.
    #[inline]
    pub fn with_limit(nodes_explored: &'a AtomicU64, limit: u64) -> Self {
        Self::new(nodes_explored, Some(limit))
    }

    /// Creates a new `NodeLimitMonitor` without a node limit.
    #[inline]
    pub fn without_limit(nodes_explored: &'a AtomicU64) -> Self {
        Self::new(nodes_explored, None)
    }

    /// Checks if the node limit has been reached.
    #[inline]
    fn reached_limit(&self) -> bool {
        if let Some(limit) = self.node_limit {
            return self.nodes_explored.load(Ordering::Relaxed) >= limit;
        }
        false
    }
}

impl SearchMonitor for NodeLimitMonitor<'_> {
    fn name(&self) -> &str {
        "NodeLimitMonitor"
    }

    fn on_enter_search(&mut self, _grid: &GridModel) {}

    fn on_exit_search(&mut self) {}

    fn on_solution_found(&mut self, _solution: &Solution) {}

    #[inline(always)]
    fn on_step(&mut self) {
        self.nodes_explored.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if self.reached_limit() {
            return SearchCommand::Terminate("global node limit reached".to_string());
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_limit_never_terminates() {
        let count = AtomicU64::new(0);
        let mut monitor = NodeLimitMonitor::without_limit(&count);
        for _ in 0..100 {
            monitor.on_step();
        }
        assert_eq!(monitor.search_command(), SearchCommand::Continue);
        assert_eq!(count.load(Ordering::Relaxed), 100);
    }

    #[test]
    fn test_terminates_at_limit() {
        let count = AtomicU64::new(0);
        let mut monitor = NodeLimitMonitor::with_limit(&count, 2);
        monitor.on_step();
        assert_eq!(monitor.search_command(), SearchCommand::Continue);
        monitor.on_step();
        assert!(matches!(
            monitor.search_command(),
            SearchCommand::Terminate(_)
        ));
    }

    #[test]
    fn test_shared_counter_across_monitors() {
        let count = AtomicU64::new(0);
        let mut first = NodeLimitMonitor::with_limit(&count, 3);
        let mut second = NodeLimitMonitor::with_limit(&count, 3);
        first.on_step();
        first.on_step();
        second.on_step();
        // Both see the shared total.
        assert!(matches!(first.search_command(), SearchCommand::Terminate(_)));
        assert!(matches!(
            second.search_command(),
            SearchCommand::Terminate(_)
        ));
    }
}
