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

/// Statistics aggregated over a whole solve, across all workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverStatistics {
    /// Number of improving solutions found during the solve.
    pub solutions_found: u64,
    /// Number of search-tree nodes explored across all workers.
    pub nodes_explored: u64,
    /// Number of reachability evaluations across all workers.
    pub evaluations: u64,
    /// Number of threads used during the solve.
    pub used_threads: usize,
    /// Total duration of the solve.
    pub solve_duration: std::time::Duration,
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solver Statistics:")?;
        writeln!(f, "  Solutions Found: {}", self.solutions_found)?;
        writeln!(f, "  Nodes Explored: {}", self.nodes_explored)?;
        writeln!(f, "  Evaluations: {}", self.evaluations)?;
        writeln!(f, "  Used Threads: {}", self.used_threads)?;
        writeln!(
            f,
            "  Solve Duration (secs): {:.3}",
            self.solve_duration.as_secs_f64()
        )
    }
}

/// Builder for `SolverStatistics`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverStatisticsBuilder {
    solutions_found: u64,
    nodes_explored: u64,
    evaluations: u64,
    used_threads: usize,
    solve_duration: std::time::Duration,
}

impl Default for SolverStatisticsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverStatisticsBuilder {
    /// Creates a new `SolverStatisticsBuilder` with default values.
    #[inline]
    pub fn new() -> Self {
        Self {
            solutions_found: 0,
            nodes_explored: 0,
            evaluations: 0,
            used_threads: 1,
            solve_duration: std::time::Duration::ZERO,
        }
    }

    /// Sets the number of improving solutions found.
    #[inline]
    pub fn solutions_found(mut self, solutions_found: u64) -> Self {
        self.solutions_found = solutions_found;
        self
    }

    /// Sets the number of explored nodes.
    #[inline]
    pub fn nodes_explored(mut self, nodes_explored: u64) -> Self {
        self.nodes_explored = nodes_explored;
        self
    }

    /// Sets the number of reachability evaluations.
    #[inline]
    pub fn evaluations(mut self, evaluations: u64) -> Self {
        self.evaluations = evaluations;
        self
    }

    /// Sets the number of threads used.
    #[inline]
    pub fn used_threads(mut self, used_threads: usize) -> Self {
        self.used_threads = used_threads;
        self
    }

    /// Sets the total solve duration.
    #[inline]
    pub fn solve_duration(mut self, solve_duration: std::time::Duration) -> Self {
        self.solve_duration = solve_duration;
        self
    }

    /// Builds the `SolverStatistics` instance.
    #[inline]
    pub fn build(self) -> SolverStatistics {
        SolverStatistics {
            solutions_found: self.solutions_found,
            nodes_explored: self.nodes_explored,
            evaluations: self.evaluations,
            used_threads: self.used_threads,
            solve_duration: self.solve_duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SolverStatistics, SolverStatisticsBuilder};
    use std::time::Duration;

    #[test]
    fn test_builder_constructs_expected_struct() {
        let stats = SolverStatisticsBuilder::new()
            .solutions_found(3)
            .nodes_explored(128)
            .evaluations(200)
            .used_threads(8)
            .solve_duration(Duration::from_millis(1234))
            .build();

        assert_eq!(stats.solutions_found, 3);
        assert_eq!(stats.nodes_explored, 128);
        assert_eq!(stats.evaluations, 200);
        assert_eq!(stats.used_threads, 8);
        assert_eq!(stats.solve_duration, Duration::from_millis(1234));
    }

    #[test]
    fn test_display_formats_all_fields() {
        let stats = SolverStatistics {
            solutions_found: 2,
            nodes_explored: 64,
            evaluations: 80,
            used_threads: 4,
            solve_duration: Duration::from_millis(1234),
        };

        let rendered = format!("{}", stats);

        assert!(rendered.contains("Solver Statistics:"), "missing header");
        assert!(
            rendered.contains("Solutions Found: 2"),
            "missing solutions_found"
        );
        assert!(
            rendered.contains("Nodes Explored: 64"),
            "missing nodes_explored"
        );
        assert!(rendered.contains("Evaluations: 80"), "missing evaluations");
        assert!(rendered.contains("Used Threads: 4"), "missing used_threads");
        assert!(
            rendered.contains("Solve Duration (secs): 1.234"),
            "missing solve_duration"
        );
    }
}
