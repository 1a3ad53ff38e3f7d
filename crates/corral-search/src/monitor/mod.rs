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

//! # Search Monitors
//!
//! Pluggable observers and controllers for search lifecycle events.
//! Monitors can collect metrics, enforce budgets (time, nodes), and issue
//! termination commands without entangling those concerns in the core
//! search loop.
//!
//! ## Submodules
//!
//! - `search_monitor`: Core trait (`SearchMonitor`) and `SearchCommand`
//!   enum, defining lifecycle hooks and control flow.
//! - `composite`: Aggregate multiple monitors into a single composite.
//! - `index`: Strongly typed monitor indices for safe addressing.
//! - `interrupt`: Atomically-driven interrupt monitor for cross-thread stops.
//! - `node_limit`: Node-count monitor with a global limit via `AtomicU64`.
//! - `time_limit`: Wall-clock time budget monitor with step-filtered checks.
//!
//! Refer to each submodule for detailed APIs and examples.

pub mod composite;
pub mod index;
pub mod interrupt;
pub mod node_limit;
pub mod search_monitor;
pub mod time_limit;

pub use composite::CompositeMonitor;
pub use interrupt::InterruptMonitor;
pub use node_limit::NodeLimitMonitor;
pub use search_monitor::{SearchCommand, SearchMonitor};
pub use time_limit::TimeLimitMonitor;
