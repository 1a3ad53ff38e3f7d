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

use std::time::Duration;

/// Statistics collected during the execution of the exact enclosure solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BnbSolverStatistics {
    /// Total nodes visited.
    pub nodes_explored: u64,
    /// Total reachability evaluations performed.
    pub evaluations: u64,
    /// Total distinct branching choices generated.
    pub decisions_generated: u64,
    /// The deepest wall count reached in the tree.
    pub max_depth: u64,
    /// Pruned because the optimistic bound could not beat the incumbent.
    pub prunings_bound: u64,
    /// Subtrees closed because the node already enclosed the agent.
    pub subtrees_enclosed: u64,
    /// Nodes that died with no branching candidates left (budget spent or
    /// every remaining candidate unreachable).
    pub prunings_exhausted: u64,
    /// Total improving solutions found during the search.
    pub solutions_found: u64,
    /// Total time spent in the solver.
    pub time_total: Duration,
    /// The optimistic bound at the root node. Used to report the gap.
    pub root_upper_bound: i64,
}

impl Default for BnbSolverStatistics {
    fn default() -> Self {
        Self {
            nodes_explored: 0,
            evaluations: 0,
            decisions_generated: 0,
            max_depth: 0,
            prunings_bound: 0,
            subtrees_enclosed: 0,
            prunings_exhausted: 0,
            solutions_found: 0,
            time_total: Duration::ZERO,
            root_upper_bound: 0,
        }
    }
}

impl BnbSolverStatistics {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_evaluation(&mut self) {
        self.evaluations = self.evaluations.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_decision_generated(&mut self) {
        self.decisions_generated = self.decisions_generated.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_subtree_enclosed(&mut self) {
        self.subtrees_enclosed = self.subtrees_enclosed.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_exhausted(&mut self) {
        self.prunings_exhausted = self.prunings_exhausted.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    #[inline]
    pub fn set_root_upper_bound(&mut self, bound: i64) {
        self.root_upper_bound = bound;
    }

    /// Folds the counters of another run into this one. Durations add up;
    /// the root bound keeps the maximum, matching a split root.
    pub fn merge(&mut self, other: &BnbSolverStatistics) {
        self.nodes_explored = self.nodes_explored.saturating_add(other.nodes_explored);
        self.evaluations = self.evaluations.saturating_add(other.evaluations);
        self.decisions_generated = self
            .decisions_generated
            .saturating_add(other.decisions_generated);
        self.max_depth = self.max_depth.max(other.max_depth);
        self.prunings_bound = self.prunings_bound.saturating_add(other.prunings_bound);
        self.subtrees_enclosed = self.subtrees_enclosed.saturating_add(other.subtrees_enclosed);
        self.prunings_exhausted = self
            .prunings_exhausted
            .saturating_add(other.prunings_exhausted);
        self.solutions_found = self.solutions_found.saturating_add(other.solutions_found);
        self.time_total += other.time_total;
        self.root_upper_bound = self.root_upper_bound.max(other.root_upper_bound);
    }
}

impl std::fmt::Display for BnbSolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Corral-BnB Solver Statistics:")?;
        writeln!(f, "  Nodes explored:       {}", self.nodes_explored)?;
        writeln!(f, "  Evaluations:          {}", self.evaluations)?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        writeln!(f, "  Decisions generated:  {}", self.decisions_generated)?;
        writeln!(f, "  Prunings (bound):     {}", self.prunings_bound)?;
        writeln!(f, "  Subtrees enclosed:    {}", self.subtrees_enclosed)?;
        writeln!(f, "  Prunings (exhausted): {}", self.prunings_exhausted)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Root Upper Bound:     {}", self.root_upper_bound)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_increment() {
        let mut stats = BnbSolverStatistics::default();
        stats.on_node_explored();
        stats.on_node_explored();
        stats.on_evaluation();
        stats.on_pruning_bound();
        stats.on_subtree_enclosed();
        stats.on_depth_update(3);
        stats.on_depth_update(2);

        assert_eq!(stats.nodes_explored, 2);
        assert_eq!(stats.evaluations, 1);
        assert_eq!(stats.prunings_bound, 1);
        assert_eq!(stats.subtrees_enclosed, 1);
        assert_eq!(stats.max_depth, 3);
    }

    #[test]
    fn test_merge_adds_counts_and_keeps_max_depth() {
        let mut first = BnbSolverStatistics {
            nodes_explored: 10,
            evaluations: 12,
            max_depth: 2,
            root_upper_bound: 9,
            ..Default::default()
        };
        let second = BnbSolverStatistics {
            nodes_explored: 5,
            evaluations: 6,
            max_depth: 4,
            root_upper_bound: 7,
            ..Default::default()
        };
        first.merge(&second);
        assert_eq!(first.nodes_explored, 15);
        assert_eq!(first.evaluations, 18);
        assert_eq!(first.max_depth, 4);
        assert_eq!(first.root_upper_bound, 9);
    }

    #[test]
    fn test_display_lists_all_counters() {
        let stats = BnbSolverStatistics::default();
        let rendered = format!("{}", stats);
        assert!(rendered.contains("Nodes explored"));
        assert!(rendered.contains("Prunings (bound)"));
        assert!(rendered.contains("Subtrees enclosed"));
        assert!(rendered.contains("Root Upper Bound"));
    }
}
