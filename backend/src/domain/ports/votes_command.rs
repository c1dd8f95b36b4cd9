//! Driving port for casting votes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, PostRef, UserId, VoteDirection, VoteOutcome};

/// A vote as requested by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastVoteRequest {
    pub voter: UserId,
    pub target: PostRef,
    pub direction: VoteDirection,
}

/// Driving port for vote reconciliation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VotesCommand: Send + Sync {
    /// Reconcile the request against the voter's existing vote.
    ///
    /// Returns the action taken (`new_vote`, `unvote` or `flip`) and the
    /// reputation delta applied to the post owner. Fails with `not_found`
    /// for a missing post, `forbidden` for a self-vote and `conflict` when a
    /// concurrent reconciliation changed the vote first.
    async fn cast_vote(&self, request: CastVoteRequest) -> Result<VoteOutcome, Error>;
}
