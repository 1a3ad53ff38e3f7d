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

//! Incumbent management for branch-and-bound
//!
//! Declares `IncumbentStore`, a minimal interface to read/update the best
//! known score (lower bound) and publish new enclosures during search.
//! This abstracts over local (single-threaded) and shared (multi-solver) use.
//!
//! Implementations
//! - `NoSharedIncumbent`: local only. `initial_lower_bound = i64::MIN`,
//!   `tighten(x) = x`, and `on_solution_found` is a no-op.
//! - `SharedIncumbentAdapter<'a>`: wraps `corral_search::incumbent::SharedIncumbent`;
//!   `initial_lower_bound()` mirrors the shared value, `tighten(x)` returns
//!   `max(shared, x)`, and `on_solution_found` attempts installation.
//!
//! Notes
//! - `SharedIncumbentAdapter` holds a borrowed handle and is lifetime-bound.
//! - Use shared incumbents to coordinate bounds across parallel runs.

use corral_model::solution::Solution;
use corral_search::incumbent::SharedIncumbent;

/// Trait for managing incumbent solutions in a branch-and-bound solver.
/// This trait defines methods for initializing, synchronizing, and updating
/// the incumbent solution during the solving process.
/// This is particularly useful in parallel solving scenarios, where multiple
/// solver instances may need to share and update the best-known solution
/// and its lower bound.
pub trait IncumbentStore {
    /// Returns the initial lower bound for the incumbent solution.
    fn initial_lower_bound(&self) -> i64;
    /// Synchronizes the current local best score with the shared incumbent.
    fn tighten(&self, current_local_best: i64) -> i64;
    /// Notifies the backing that a new solution has been found.
    fn on_solution_found(&self, solution: &Solution);
}

/// An `IncumbentStore` implementation that does not share the incumbent
/// solution between different solver instances. Use this for
/// single-threaded or isolated solving scenarios.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSharedIncumbent;

impl NoSharedIncumbent {
    /// Creates a new `NoSharedIncumbent` instance.
    #[inline(always)]
    pub fn new() -> Self {
        Self
    }
}

impl IncumbentStore for NoSharedIncumbent {
    #[inline(always)]
    fn initial_lower_bound(&self) -> i64 {
        i64::MIN
    }

    #[inline(always)]
    fn tighten(&self, current_local_best: i64) -> i64 {
        current_local_best
    }

    #[inline(always)]
    fn on_solution_found(&self, _: &Solution) {}
}

/// An `IncumbentStore` implementation that shares the incumbent
/// solution between different solver instances using a `SharedIncumbent`.
#[repr(transparent)]
#[derive(Debug, Clone)]
pub struct SharedIncumbentAdapter<'a> {
    inner: &'a SharedIncumbent,
}

impl<'a> SharedIncumbentAdapter<'a> {
    /// Creates a new `SharedIncumbentAdapter` that wraps the given
    /// `SharedIncumbent`.
    #[inline(always)]
    pub fn new(inner: &'a SharedIncumbent) -> Self {
        Self { inner }
    }
}

impl<'a> IncumbentStore for SharedIncumbentAdapter<'a> {
    #[inline(always)]
    fn initial_lower_bound(&self) -> i64 {
        self.inner.lower_bound()
    }

    #[inline(always)]
    fn tighten(&self, current_local_best: i64) -> i64 {
        // We maximize, so both bounds are valid and the larger one prunes more.
        self.inner.lower_bound().max(current_local_best)
    }

    #[inline(always)]
    fn on_solution_found(&self, solution: &Solution) {
        self.inner.try_install(solution);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corral_model::index::CellIndex;
    use corral_model::solution::{Placement, Solution};
    use corral_search::incumbent::SharedIncumbent;

    fn make_solution(score: i64) -> Solution {
        Solution::new(Placement::new(vec![CellIndex::new(4)]), score, false)
    }

    #[test]
    fn no_shared_incumbent_initial_lower_bound_is_min() {
        let store = NoSharedIncumbent::new();
        assert_eq!(store.initial_lower_bound(), i64::MIN);
    }

    #[test]
    fn no_shared_incumbent_tighten_is_passthrough() {
        let store = NoSharedIncumbent::new();
        let values = [0, 1, 42, i64::MAX - 1];
        for &val in &values {
            assert_eq!(store.tighten(val), val);
        }
    }

    #[test]
    fn shared_incumbent_adapter_initial_lower_bound_reads_shared() {
        let shared = SharedIncumbent::new();
        let adapter = SharedIncumbentAdapter::new(&shared);

        // Fresh SharedIncumbent starts with the i64::MIN sentinel.
        assert_eq!(adapter.initial_lower_bound(), i64::MIN);

        // Install a solution to raise the shared lower bound.
        let s = make_solution(4);
        assert!(shared.try_install(&s));
        assert_eq!(adapter.initial_lower_bound(), 4);
    }

    #[test]
    fn shared_incumbent_adapter_tighten_returns_max_with_shared_bound() {
        let shared = SharedIncumbent::new();
        let adapter = SharedIncumbentAdapter::new(&shared);

        let best = make_solution(10);
        assert!(shared.try_install(&best));

        // Local best is worse -> tighten returns shared (max).
        assert_eq!(adapter.tighten(3), 10);

        // Local best is better -> returns local (max).
        assert_eq!(adapter.tighten(15), 15);
    }

    #[test]
    fn shared_incumbent_adapter_on_solution_found_installs_in_shared() {
        let shared = SharedIncumbent::new();
        let adapter = SharedIncumbentAdapter::new(&shared);

        let s = make_solution(7);
        adapter.on_solution_found(&s);

        assert_eq!(shared.lower_bound(), 7);
        let snap = shared.snapshot().expect("snapshot should be Some");
        assert_eq!(snap.score(), 7);
    }
}
