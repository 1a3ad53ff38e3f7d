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

//! # Corral Reachability
//!
//! The evaluation core of the enclosure solver: given a grid and a wall
//! placement, compute the agent's reachable closure, decide whether it
//! escapes, and score the enclosure.
//!
//! ## Modules
//!
//! - `engine`: [`ReachabilityEngine`](engine::ReachabilityEngine), a BFS
//!   over the 4-connected grid plus teleport edges with reusable buffers,
//!   and [`Evaluation`](engine::Evaluation), the scored result.
//! - `candidates`: Enumeration and ordering of legal wall positions
//!   ([`CandidatePolicy`](candidates::CandidatePolicy)).

pub mod candidates;
pub mod engine;

pub use candidates::{candidates, frontier_ordering, CandidatePolicy};
pub use engine::{Evaluation, ReachabilityEngine};
