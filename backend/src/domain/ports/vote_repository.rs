//! Port for vote persistence used by the vote reconciler.
//!
//! The reconciler reads the voter's current vote and the post owner, decides
//! a [`VoteMutation`] and hands it to [`VoteRepository::apply`]. Adapters must
//! apply the vote change and the owner's reputation delta in one atomic unit
//! and must refuse the mutation with [`VoteRepositoryError::Conflict`] when
//! the vote it was decided against no longer matches:
//!
//! - `Create` when the voter already holds a vote on the target;
//! - `Update` when the vote is gone or no longer points `from`;
//! - `Delete` when the vote is gone or its direction changed.
//!
//! A voter with no account is reported as
//! [`VoteRepositoryError::MissingReference`], never as a conflict.
//!
//! Nothing is written when a mutation is refused.

use async_trait::async_trait;

use crate::domain::{PostRef, UserId, Vote, VoteHistoryEntry, VoteMutation};

use super::define_port_error;

define_port_error! {
    /// Errors raised by vote repository adapters.
    pub enum VoteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "vote repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "vote repository query failed: {message}",
        /// The stored vote changed after it was read.
        Conflict { message: String } => "vote conflict: {message}",
        /// The voter or the voted post does not exist.
        MissingReference { message: String } => "{message}",
    }
}

/// Storage for votes and the reputation they move.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// The voter's current vote on `target`, if any.
    async fn find_vote(
        &self,
        voter: UserId,
        target: PostRef,
    ) -> Result<Option<Vote>, VoteRepositoryError>;

    /// Owner of the target post, or `None` if the post does not exist.
    async fn find_post_owner(&self, target: PostRef)
    -> Result<Option<UserId>, VoteRepositoryError>;

    /// Apply a vote change and the owner's reputation delta atomically.
    async fn apply(&self, mutation: &VoteMutation) -> Result<(), VoteRepositoryError>;

    /// The user's votes, newest first, with a summary of each target.
    async fn list_for_user(
        &self,
        voter: UserId,
    ) -> Result<Vec<VoteHistoryEntry>, VoteRepositoryError>;
}

/// Fixture implementation where no post exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVoteRepository;

#[async_trait]
impl VoteRepository for FixtureVoteRepository {
    async fn find_vote(
        &self,
        _voter: UserId,
        _target: PostRef,
    ) -> Result<Option<Vote>, VoteRepositoryError> {
        Ok(None)
    }

    async fn find_post_owner(
        &self,
        _target: PostRef,
    ) -> Result<Option<UserId>, VoteRepositoryError> {
        Ok(None)
    }

    async fn apply(&self, _mutation: &VoteMutation) -> Result<(), VoteRepositoryError> {
        Err(VoteRepositoryError::conflict("fixture has no posts"))
    }

    async fn list_for_user(
        &self,
        _voter: UserId,
    ) -> Result<Vec<VoteHistoryEntry>, VoteRepositoryError> {
        Ok(Vec::new())
    }
}
