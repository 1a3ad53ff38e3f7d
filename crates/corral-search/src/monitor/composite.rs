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

use crate::monitor::{
    index::MonitorIndex,
    search_monitor::{SearchCommand, SearchMonitor},
};
use corral_model::{grid::GridModel, solution::Solution};

/// A composite monitor that aggregates multiple monitors and forwards
/// events to all of them.
///
/// `search_command` answers with the first `Terminate` any child issues,
/// checked in insertion order.
pub struct CompositeMonitor<'a> {
    monitors: Vec<Box<dyn SearchMonitor + 'a>>,
}

impl std::fmt::Debug for CompositeMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let monitors_str = self
            .monitors
            .iter()
            .map(|m| m.name())
            .collect::<Vec<&str>>()
            .join(", ");

        f.debug_struct("CompositeMonitor")
            .field("monitors", &monitors_str)
            .finish()
    }
}

impl std::fmt::Display for CompositeMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let monitors_str = self
            .monitors
            .iter()
            .map(|m| m.name())
            .collect::<Vec<&str>>()
            .join(", ");

        write!(f, "CompositeMonitor([{}])", monitors_str)
    }
}

impl Default for CompositeMonitor<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CompositeMonitor<'a> {
    /// Creates a new empty `CompositeMonitor`.
    #[inline]
    pub fn new() -> CompositeMonitor<'a> {
        CompositeMonitor {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeMonitor` with the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> CompositeMonitor<'a> {
        CompositeMonitor {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Creates a new `CompositeMonitor` from a vector of boxed monitors.
    #[inline]
    pub fn from_vec(monitors: Vec<Box<dyn SearchMonitor + 'a>>) -> CompositeMonitor<'a> {
        CompositeMonitor { monitors }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SearchMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a new boxed monitor to the composite monitor.
    #[inline]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn SearchMonitor + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns the number of monitors in the composite monitor.
    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if the composite monitor contains no monitors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Returns a reference to the monitor at the specified index.
    ///
    /// # Panics
    ///
    /// Panics if `monitor_index` is out of bounds.
    #[inline]
    pub fn monitor(&'a self, monitor_index: MonitorIndex) -> &'a dyn SearchMonitor {
        let index = monitor_index.get();
        debug_assert!(
            index < self.monitors.len(),
            "called `CompositeMonitor::monitor` with monitor index out of bounds: the len is {} but the index is {}",
            self.monitors.len(),
            index
        );
        self.monitors[index].as_ref()
    }
}

impl SearchMonitor for CompositeMonitor<'_> {
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, grid: &GridModel) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_enter_search(grid);
        }
    }

    fn on_exit_search(&mut self) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_exit_search();
        }
    }

    fn on_solution_found(&mut self, solution: &Solution) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_solution_found(solution);
        }
    }

    #[inline]
    fn on_step(&mut self) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_step();
        }
    }

    fn search_command(&self) -> SearchCommand {
        for monitor in self.monitors.iter() {
            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                return SearchCommand::Terminate(reason);
            }
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corral_model::grid::GridBuilder;

    struct CountingMonitor {
        steps: u64,
        terminate_after: Option<u64>,
    }

    impl SearchMonitor for CountingMonitor {
        fn name(&self) -> &str {
            "CountingMonitor"
        }
        fn on_enter_search(&mut self, _grid: &GridModel) {}
        fn on_exit_search(&mut self) {}
        fn on_solution_found(&mut self, _solution: &Solution) {}
        fn on_step(&mut self) {
            self.steps += 1;
        }
        fn search_command(&self) -> SearchCommand {
            match self.terminate_after {
                Some(limit) if self.steps >= limit => {
                    SearchCommand::Terminate("counting limit reached".to_string())
                }
                _ => SearchCommand::Continue,
            }
        }
    }

    fn tiny_grid() -> GridModel {
        let mut builder = GridBuilder::new(3, 3);
        builder.set_origin(builder.cell_at(1, 1));
        builder.build().unwrap()
    }

    #[test]
    fn test_empty_composite_continues() {
        let composite = CompositeMonitor::new();
        assert!(composite.is_empty());
        assert_eq!(composite.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_forwards_steps_and_reports_first_terminate() {
        let mut composite = CompositeMonitor::new();
        composite.add_monitor(CountingMonitor {
            steps: 0,
            terminate_after: None,
        });
        composite.add_monitor(CountingMonitor {
            steps: 0,
            terminate_after: Some(2),
        });
        assert_eq!(composite.len(), 2);

        let grid = tiny_grid();
        composite.on_enter_search(&grid);
        composite.on_step();
        assert_eq!(composite.search_command(), SearchCommand::Continue);
        composite.on_step();
        assert!(matches!(
            composite.search_command(),
            SearchCommand::Terminate(_)
        ));
        composite.on_exit_search();
    }
}
