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

//! # Shared Incumbent (Best Solution Holder)
//!
//! A concurrent container for the best enclosure discovered so far. It
//! exposes a fast, lock-free lower bound via an atomic and stores the
//! actual [`Solution`] behind a `Mutex` as the source of truth. Designed
//! for search pipelines where multiple threads propose improvements.
//!
//! ## Motivation
//!
//! - Fast heuristic checks: a cheap atomic lower bound short-circuits
//!   attempts to install obviously worse candidates without locking.
//! - Correctness by locking: the authoritative incumbent is protected by
//!   a `Mutex`, ensuring consistent updates even under contention.
//! - Simple sentinel: `lower_bound` starts at `i64::MIN` meaning "no
//!   incumbent yet."
//!
//! ## Highlights
//!
//! - `try_install(&Solution) -> bool` installs strictly better candidates,
//!   updating both the snapshot and the atomic lower bound.
//! - `snapshot() -> Option<Solution>` returns a cloned snapshot of the
//!   current incumbent (if any).
//! - Concurrency: atomic reads/writes use `Ordering::Relaxed` for
//!   performance, while the mutex ensures correctness of the stored
//!   solution.
//!
//! ## Usage
//!
//! ```rust
//! use corral_search::incumbent::SharedIncumbent;
//! use corral_model::{Placement, Solution};
//!
//! let inc = SharedIncumbent::new();
//! let candidate = Solution::new(Placement::empty(), 0, true);
//!
//! if inc.try_install(&candidate) {
//!     // Installed as new best
//! }
//!
//! let lb = inc.lower_bound();           // fast atomic read
//! let snap = inc.snapshot();            // optional cloned solution
//! ```

use corral_model::solution::Solution;
use std::sync::{atomic::AtomicI64, Mutex};

/// A concurrent holder for the best (incumbent) enclosure found so far.
///
/// This structure maintains:
/// - an `AtomicI64` lower bound (score) for fast, lock-free reads, and
/// - a `Mutex<Option<Solution>>` for the actual solution, which is the
///   source of truth.
///
/// Concurrency and memory ordering:
/// - The lower bound is loaded/stored with `Ordering::Relaxed`. This is
///   sufficient because it only serves as a heuristic to short-circuit work
///   (e.g., avoid locking when a candidate is obviously worse). All
///   correctness-sensitive state (the solution and its score) is
///   synchronized via the `Mutex`.
///
/// Sentinel initialization:
/// - `lower_bound` starts at `i64::MIN` to represent "no solution installed
///   yet." We maximize the score, so any real candidate beats the sentinel.
#[derive(Debug)]
pub struct SharedIncumbent {
    /// Score of the incumbent solution stored as `i64` for atomic access.
    lower_bound: AtomicI64,

    /// The incumbent solution, protected by a mutex for safe concurrent access.
    solution: Mutex<Option<Solution>>,
}

impl Default for SharedIncumbent {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SharedIncumbent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Incumbent(lower_bound: {})", self.lower_bound())
    }
}

impl SharedIncumbent {
    /// Creates a new shared incumbent with no solution installed.
    /// The initial lower bound is set to `i64::MIN`.
    #[inline]
    pub fn new() -> Self {
        SharedIncumbent {
            lower_bound: AtomicI64::new(i64::MIN),
            solution: Mutex::new(None),
        }
    }

    /// Returns the current lower bound.
    #[inline]
    pub fn lower_bound(&self) -> i64 {
        self.lower_bound.load(std::sync::atomic::Ordering::Relaxed)
    }

    /// Returns a snapshot of the current incumbent solution, if any.
    #[inline]
    pub fn snapshot(&self) -> Option<Solution> {
        let guard = self.solution.lock().unwrap();
        guard.clone()
    }

    /// Attempts to install the given candidate solution as the new incumbent.
    /// Returns `true` if the candidate was installed, `false` otherwise.
    #[inline]
    pub fn try_install(&self, candidate: &Solution) -> bool {
        let candidate_score = candidate.score();
        let current_lower_bound = self.lower_bound();

        // We are maximizing, so higher is better. The `i64::MIN` sentinel
        // loses against every real score, so the first install passes.
        if candidate_score <= current_lower_bound {
            return false;
        }

        let mut guard = self.solution.lock().unwrap();
        // Another thread might have updated the solution while we were
        // waiting for the lock. We must compare against the *actual*
        // solution in the Mutex, not the atomic hint we read earlier.
        if let Some(current_solution) = guard.as_ref() {
            if candidate_score <= current_solution.score() {
                return false;
            }
        }

        // Install the new incumbent.
        *guard = Some(candidate.clone());
        // Update the lower bound atomically.
        self.lower_bound
            .store(candidate_score, std::sync::atomic::Ordering::Relaxed);

        true
    }
}
