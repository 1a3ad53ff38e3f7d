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

//! Adapter for external search monitors
//!
//! `WrapperMonitor` bridges this crate's `TreeSearchMonitor` with a generic
//! `SearchMonitor` from `corral_search`. It forwards lifecycle events and
//! commands to the inner monitor while ignoring tree-specific callbacks.
//!
//! Behavior
//! - Delegates: enter, step, solution, exit, and `search_command`.
//! - No-ops: prune, bound, and decisions-enqueued.
//! - `name()` is `WrapperMonitor(inner.name())`.
//! - Holds `&mut dyn SearchMonitor`; lifetime-bound, single owner.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    stats::BnbSolverStatistics,
};
use corral_model::{grid::GridModel, solution::Solution};
use corral_search::monitor::search_monitor::{SearchCommand, SearchMonitor};

/// A wrapper tree search monitor, that wraps a general
/// search monitor.
pub struct WrapperMonitor<'a> {
    inner: &'a mut dyn SearchMonitor,
    name: String,
}

impl<'a> WrapperMonitor<'a> {
    /// Creates a new `WrapperMonitor` that wraps the given
    /// search monitor.
    #[inline(always)]
    pub fn new(inner: &'a mut dyn SearchMonitor) -> Self {
        let name = format!("WrapperMonitor({})", inner.name());
        Self { inner, name }
    }
}

impl<'a> TreeSearchMonitor for WrapperMonitor<'a> {
    #[inline(always)]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    fn on_enter_search(&mut self, grid: &GridModel, _statistics: &BnbSolverStatistics) {
        self.inner.on_enter_search(grid);
    }

    #[inline(always)]
    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {
        self.inner.on_exit_search();
    }

    #[inline(always)]
    fn search_command(&mut self, _statistics: &BnbSolverStatistics) -> SearchCommand {
        self.inner.search_command()
    }

    #[inline(always)]
    fn on_step(&mut self, _statistics: &BnbSolverStatistics) {
        self.inner.on_step();
    }

    #[inline(always)]
    fn on_bound_computed(&mut self, _depth: usize, _bound: i64, _statistics: &BnbSolverStatistics) {
    }

    #[inline(always)]
    fn on_prune(&mut self, _reason: PruneReason, _statistics: &BnbSolverStatistics) {}

    #[inline(always)]
    fn on_decisions_enqueued(&mut self, _count: usize, _statistics: &BnbSolverStatistics) {}

    #[inline(always)]
    fn on_solution_found(&mut self, solution: &Solution, _statistics: &BnbSolverStatistics) {
        self.inner.on_solution_found(solution);
    }
}
