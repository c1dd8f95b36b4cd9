//! Driving port for reading a user's votes.

use async_trait::async_trait;

use crate::domain::{Error, PostRef, UserId, VoteDirection, VoteHistoryEntry};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VotesQuery: Send + Sync {
    /// The voter's current direction on `target`, or `None`.
    async fn vote_status(
        &self,
        voter: UserId,
        target: PostRef,
    ) -> Result<Option<VoteDirection>, Error>;

    /// The voter's votes, newest first.
    async fn vote_history(&self, voter: UserId) -> Result<Vec<VoteHistoryEntry>, Error>;
}
