//! Reputation deltas applied to post owners.
//!
//! Question and answer votes share one table: an upvote received is worth
//! `+10` and a downvote received `-2`, whichever kind of post it lands on.
//! Reversing a downvote reuses the same `-2` constant.

use std::fmt;
use std::ops::{Add, Neg};

use serde::{Deserialize, Serialize};

use crate::domain::VoteDirection;

/// Reputation granted to a post owner for a received upvote.
pub const UPVOTE_RECEIVED: ReputationDelta = ReputationDelta(10);

/// Reputation applied to a post owner for a received downvote.
pub const RECEIVED_DOWNVOTE: ReputationDelta = ReputationDelta(-2);

/// Bonus granted to the author of the accepted answer.
pub const ACCEPTED_ANSWER_BONUS: ReputationDelta = ReputationDelta(15);

/// Signed change to a user's reputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReputationDelta(i64);

impl ReputationDelta {
    /// No change.
    pub const ZERO: Self = Self(0);

    /// Wrap a raw delta.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw signed value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Delta a post owner receives for a vote in `direction`.
    ///
    /// # Examples
    /// ```
    /// use forum_backend::domain::{ReputationDelta, VoteDirection};
    ///
    /// assert_eq!(ReputationDelta::for_vote(VoteDirection::Up).get(), 10);
    /// assert_eq!(ReputationDelta::for_vote(VoteDirection::Down).get(), -2);
    /// ```
    #[must_use]
    pub const fn for_vote(direction: VoteDirection) -> Self {
        match direction {
            VoteDirection::Up => UPVOTE_RECEIVED,
            VoteDirection::Down => RECEIVED_DOWNVOTE,
        }
    }
}

impl Add for ReputationDelta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Neg for ReputationDelta {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl fmt::Display for ReputationDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn flip_swing_is_twelve_points() {
        let up_to_down = -ReputationDelta::for_vote(VoteDirection::Up)
            + ReputationDelta::for_vote(VoteDirection::Down);
        assert_eq!(up_to_down.get(), -12);
        assert_eq!((-up_to_down).get(), 12);
    }

    #[rstest]
    fn displays_with_sign() {
        assert_eq!(ACCEPTED_ANSWER_BONUS.to_string(), "+15");
        assert_eq!(RECEIVED_DOWNVOTE.to_string(), "-2");
    }
}
