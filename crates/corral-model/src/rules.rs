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

//! Configurable scoring weights.
//!
//! The enclosure score is `area + bonus`, where `area` counts enclosed open
//! cells and `bonus` rewards each enclosed reward cell. The default
//! weighting makes a reward cell worth `1 + 3 = 4` points total: one point
//! as an ordinary enclosed cell plus a bonus of three.

/// Reward weighting applied when scoring an enclosure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreRules {
    /// Extra points per enclosed reward cell, on top of any area point.
    pub reward_bonus: i64,

    /// Whether a reward cell also counts as one point of area.
    ///
    /// With the default `true`, an enclosed reward cell is worth
    /// `1 + reward_bonus` in total; with `false` it is worth `reward_bonus`
    /// alone.
    pub reward_counts_in_area: bool,
}

impl ScoreRules {
    /// The default bonus per enclosed reward cell.
    pub const DEFAULT_REWARD_BONUS: i64 = 3;

    /// Creates a new set of scoring rules.
    ///
    /// # Panics
    ///
    /// Panics if `reward_bonus` is negative. A negative bonus would break
    /// the monotonicity that the exact solver's bound relies on.
    #[inline]
    pub fn new(reward_bonus: i64, reward_counts_in_area: bool) -> Self {
        assert!(
            reward_bonus >= 0,
            "called `ScoreRules::new` with negative reward bonus: {}",
            reward_bonus
        );
        Self {
            reward_bonus,
            reward_counts_in_area,
        }
    }
}

impl Default for ScoreRules {
    #[inline]
    fn default() -> Self {
        Self {
            reward_bonus: Self::DEFAULT_REWARD_BONUS,
            reward_counts_in_area: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = ScoreRules::default();
        assert_eq!(rules.reward_bonus, 3);
        assert!(rules.reward_counts_in_area);
    }

    #[test]
    #[should_panic]
    fn test_negative_bonus_panics() {
        let _ = ScoreRules::new(-1, true);
    }
}
