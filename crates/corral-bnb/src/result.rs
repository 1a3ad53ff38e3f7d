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

use crate::stats::BnbSolverStatistics;
use corral_model::solution::Solution;
use corral_search::result::{SolverResult, TerminationReason};

/// Result of the exact solver after termination.
///
/// Every run produces a solution: when no enclosure exists, the empty
/// placement with score zero (and the agent escaping) is the optimum.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome {
    result: SolverResult,
    termination_reason: TerminationReason,
    statistics: BnbSolverStatistics,
}

impl BnbSolverOutcome {
    /// The search ran to completion; `solution` is provably optimal.
    #[inline]
    pub fn optimal(solution: Solution, statistics: BnbSolverStatistics) -> Self {
        Self {
            result: SolverResult::Optimal(solution),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    /// The search was cut short; `solution` is the best found so far.
    #[inline]
    pub fn aborted<R>(solution: Solution, reason: R, statistics: BnbSolverStatistics) -> Self
    where
        R: Into<String>,
    {
        Self {
            result: SolverResult::Feasible(solution),
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    /// Returns the solver result.
    #[inline]
    pub fn result(&self) -> &SolverResult {
        &self.result
    }

    /// Returns the best solution found.
    #[inline]
    pub fn solution(&self) -> &Solution {
        self.result.solution()
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics {
        &self.statistics
    }

    /// Returns `true` if optimality was proven.
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }
}

impl std::fmt::Display for BnbSolverOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result: {}", self.result)?;
        writeln!(f, "Termination: {}", self.termination_reason)?;
        write!(f, "{}", self.statistics)
    }
}
