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

//! # Corral Solver
//!
//! High-level orchestration for the enclosure solver. This crate wires the
//! heuristic and exact layers together: the greedy heuristic seeds a shared
//! incumbent, the branch-and-bound search (serial or parallel) runs against
//! it under the selected mode, and the result comes back as one unified
//! outcome.
//!
//! ## Modules
//!
//! - `solver`: The [`Solver`](solver::Solver) facade with its builder,
//!   [`SolveMode`](solver::SolveMode) (exhaustive vs. anytime with limits),
//!   and reference-score comparison.
//!
//! See `solver` for detailed APIs and examples.

pub mod solver;

pub use solver::{matches_reference, SolveLimits, SolveMode, Solver, SolverBuilder};
