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

//! Common result and termination types shared by the solver front-ends.
//!
//! There is no infeasible variant: when no enclosure exists, placing no
//! walls and letting the agent escape is still a legal answer with score
//! zero, so every search ends with a solution in hand.

use crate::stats::SolverStatistics;
use corral_model::solution::Solution;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult {
    /// We have found a solution and proven its optimality.
    Optimal(Solution),
    /// We have found a feasible solution, but not proven its optimality.
    Feasible(Solution),
}

impl SolverResult {
    /// Returns the contained solution.
    #[inline]
    pub fn solution(&self) -> &Solution {
        match self {
            SolverResult::Optimal(solution) | SolverResult::Feasible(solution) => solution,
        }
    }

    /// Consumes the result and returns the contained solution.
    #[inline]
    pub fn into_solution(self) -> Solution {
        match self {
            SolverResult::Optimal(solution) | SolverResult::Feasible(solution) => solution,
        }
    }
}

impl std::fmt::Display for SolverResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Optimal(solution) => {
                write!(f, "Optimal(score={})", solution.score())
            }
            SolverResult::Feasible(solution) => {
                write!(f, "Feasible(score={})", solution.score())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The solver explored the whole search tree and proved optimality.
    OptimalityProven,
    /// The solver aborted due to a search limit (time, nodes, interrupt).
    /// The string contains information about the reason for abortion.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverOutcome {
    pub result: SolverResult,
    pub reason: TerminationReason,
    pub statistics: SolverStatistics,
}

impl SolverOutcome {
    #[inline]
    pub fn new(
        result: SolverResult,
        reason: TerminationReason,
        statistics: SolverStatistics,
    ) -> Self {
        Self {
            result,
            reason,
            statistics,
        }
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }

    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self.result, SolverResult::Feasible(_))
    }

    /// Returns the best solution found.
    #[inline]
    pub fn solution(&self) -> &Solution {
        self.result.solution()
    }
}

impl std::fmt::Display for SolverOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result: {}", self.result)?;
        writeln!(f, "Termination: {}", self.reason)?;
        write!(f, "{}", self.statistics)
    }
}
