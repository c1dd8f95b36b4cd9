//! Votes and the reconciliation decision table.
//!
//! A voter holds at most one vote per post. Casting a vote is reconciled
//! against the voter's existing vote on that post:
//!
//! | existing | requested | action     | owner delta                 |
//! |----------|-----------|------------|-----------------------------|
//! | none     | d         | `new_vote` | `REP(d)`                    |
//! | d        | d         | `unvote`   | `-REP(d)`                   |
//! | d        | -d        | `flip`     | `-REP(d) + REP(-d)`         |
//!
//! [`decide`] is pure; persistence adapters apply the resulting
//! [`VoteMutation`] atomically and conditionally on the vote it was
//! decided against.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{PostRef, ReputationDelta, UserId, VoteId};

/// Direction of a vote, stored as `+1` or `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum VoteDirection {
    Up,
    Down,
}

/// A raw vote value other than `1` or `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("vote_type must be 1 or -1, got {0}")]
pub struct InvalidVoteDirection(pub i64);

impl VoteDirection {
    /// Signed value persisted in the `vote_type` column.
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    /// The other direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

impl TryFrom<i64> for VoteDirection {
    type Error = InvalidVoteDirection;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Up),
            -1 => Ok(Self::Down),
            other => Err(InvalidVoteDirection(other)),
        }
    }
}

impl TryFrom<i32> for VoteDirection {
    type Error = InvalidVoteDirection;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl From<VoteDirection> for i64 {
    fn from(direction: VoteDirection) -> Self {
        Self::from(direction.value())
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "upvote",
            Self::Down => "downvote",
        })
    }
}

/// Stored vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub user_id: UserId,
    pub target: PostRef,
    pub direction: VoteDirection,
    pub created_at: DateTime<Utc>,
}

/// What a reconciliation did to the voter's vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteAction {
    NewVote,
    Unvote,
    Flip,
}

impl VoteAction {
    /// Wire label (`new_vote`, `unvote`, `flip`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewVote => "new_vote",
            Self::Unvote => "unvote",
            Self::Flip => "flip",
        }
    }
}

impl fmt::Display for VoteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Change to the vote table, carrying the state it is conditional on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChange {
    /// Insert a vote; fails if the voter already has one on the target.
    Create {
        voter: UserId,
        target: PostRef,
        direction: VoteDirection,
    },
    /// Change a vote's direction; fails unless it still points `from`.
    Update {
        vote_id: VoteId,
        from: VoteDirection,
        to: VoteDirection,
    },
    /// Remove a vote; fails unless it still exists with `direction`.
    Delete {
        vote_id: VoteId,
        direction: VoteDirection,
    },
}

/// Vote change plus the reputation adjustment applied with it atomically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteMutation {
    pub change: VoteChange,
    pub owner: UserId,
    pub owner_delta: ReputationDelta,
}

/// Outcome of [`decide`], before the post owner is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteDecision {
    pub action: VoteAction,
    pub change: VoteChange,
    pub owner_delta: ReputationDelta,
}

impl VoteDecision {
    /// Attach the post owner whose reputation the decision adjusts.
    #[must_use]
    pub fn into_mutation(self, owner: UserId) -> VoteMutation {
        VoteMutation {
            change: self.change,
            owner,
            owner_delta: self.owner_delta,
        }
    }
}

/// Reconcile a requested vote against the voter's existing vote.
///
/// # Examples
/// ```
/// use forum_backend::domain::{PostRef, UserId, VoteAction, VoteDirection, decide};
///
/// let voter = UserId::new(4).expect("user id");
/// let target = PostRef::from_parts(Some(1), None).expect("target");
/// let decision = decide(None, voter, target, VoteDirection::Down);
/// assert_eq!(decision.action, VoteAction::NewVote);
/// assert_eq!(decision.owner_delta.get(), -2);
/// ```
#[must_use]
pub fn decide(
    existing: Option<&Vote>,
    voter: UserId,
    target: PostRef,
    direction: VoteDirection,
) -> VoteDecision {
    match existing {
        None => VoteDecision {
            action: VoteAction::NewVote,
            change: VoteChange::Create {
                voter,
                target,
                direction,
            },
            owner_delta: ReputationDelta::for_vote(direction),
        },
        Some(vote) if vote.direction == direction => VoteDecision {
            action: VoteAction::Unvote,
            change: VoteChange::Delete {
                vote_id: vote.id,
                direction,
            },
            owner_delta: -ReputationDelta::for_vote(direction),
        },
        Some(vote) => VoteDecision {
            action: VoteAction::Flip,
            change: VoteChange::Update {
                vote_id: vote.id,
                from: vote.direction,
                to: direction,
            },
            owner_delta: -ReputationDelta::for_vote(vote.direction)
                + ReputationDelta::for_vote(direction),
        },
    }
}

/// Result of a successful reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub action: VoteAction,
    pub target: PostRef,
    /// Direction requested by the voter.
    pub direction: VoteDirection,
    pub owner_delta: ReputationDelta,
}

/// What a historical vote was cast on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VoteTargetSummary {
    Question {
        question_id: crate::domain::QuestionId,
        title: String,
    },
    Answer {
        answer_id: crate::domain::AnswerId,
        body: String,
    },
}

/// One entry of a user's vote history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteHistoryEntry {
    pub vote: Vote,
    pub target: VoteTargetSummary,
}
