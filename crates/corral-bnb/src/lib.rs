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

//! # Corral Branch-and-Bound
//!
//! The exact enclosure optimizer. Over a fixed, deterministic candidate
//! ordering it branches binarily on each candidate cell (place a wall /
//! leave it open), evaluates every node with the reachability engine, and
//! prunes with the raw-closure score as an optimistic bound.
//!
//! ## Pruning rules
//!
//! - **Bound domination**: the raw (pre-nullification) score of a node is
//!   an upper bound on every descendant, because extra walls only shrink
//!   the reachable closure. A node whose bound does not strictly beat the
//!   incumbent dies on the spot.
//! - **Enclosed subtree**: a node that already encloses the agent is the
//!   best its subtree will ever get; it becomes an incumbent candidate and
//!   the subtree is closed.
//! - **Unreachable skip**: blocking a cell outside the current raw closure
//!   cannot change anything, so such candidates are skipped outright.
//!
//! ## Modules
//!
//! - `bnb`: [`BnbSolver`](bnb::BnbSolver), the search session, and
//!   [`SearchPrefix`](bnb::SearchPrefix) for subtree-restricted runs.
//! - `parallel`: [`ParallelBnbSolver`](parallel::ParallelBnbSolver),
//!   root-prefix splitting over scoped worker threads.
//! - `incumbent`: Local vs. shared incumbent backing for the search.
//! - `monitor`: Tree-level monitors (`TreeSearchMonitor`, logging, no-op,
//!   adapter for plain `SearchMonitor`s).
//! - `result` / `stats`: Outcome and statistics types.

pub mod bnb;
pub mod incumbent;
pub mod monitor;
pub mod parallel;
pub mod result;
pub mod stats;

pub use bnb::{BnbSolver, SearchPrefix};
pub use parallel::ParallelBnbSolver;
pub use result::BnbSolverOutcome;
pub use stats::BnbSolverStatistics;
