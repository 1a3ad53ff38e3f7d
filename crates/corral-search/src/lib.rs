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

//! # Corral Search
//!
//! Shared search infrastructure used by both the exact and the heuristic
//! solvers: the concurrent incumbent holder, pluggable search monitors,
//! and the common outcome and statistics types.
//!
//! ## Modules
//!
//! - `incumbent`: [`SharedIncumbent`](incumbent::SharedIncumbent), a
//!   concurrent best-solution holder for a maximization search.
//! - `monitor`: [`SearchMonitor`](monitor::search_monitor::SearchMonitor)
//!   and concrete monitors for time, node, and interrupt limits.
//! - `result`: [`SolverResult`](result::SolverResult),
//!   [`TerminationReason`](result::TerminationReason), and
//!   [`SolverOutcome`](result::SolverOutcome).
//! - `stats`: Aggregate [`SolverStatistics`](stats::SolverStatistics).

pub mod incumbent;
pub mod monitor;
pub mod result;
pub mod stats;

pub use incumbent::SharedIncumbent;
pub use result::{SolverOutcome, SolverResult, TerminationReason};
pub use stats::{SolverStatistics, SolverStatisticsBuilder};
