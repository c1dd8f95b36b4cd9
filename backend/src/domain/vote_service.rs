//! Vote reconciliation service.
//!
//! Implements the vote driving ports over a [`VoteRepository`]. Each cast
//! vote is checked (post exists, voter is not the owner), reconciled against
//! the voter's existing vote with [`decide`], then applied as one atomic
//! [`crate::domain::VoteMutation`]. A mutation refused because a concurrent
//! request changed the vote surfaces as `conflict`; nothing is retried.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    CastVoteRequest, VoteRepository, VoteRepositoryError, VotesCommand, VotesQuery,
};
use crate::domain::{
    Error, PostRef, UserId, VoteDirection, VoteHistoryEntry, VoteOutcome, decide,
};

/// Vote service implementing [`VotesCommand`] and [`VotesQuery`].
#[derive(Clone)]
pub struct VoteService<R> {
    repo: Arc<R>,
}

impl<R> VoteService<R> {
    /// Create a new service with the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> VoteService<R>
where
    R: VoteRepository,
{
    fn map_repository_error(error: VoteRepositoryError) -> Error {
        match error {
            VoteRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("vote repository unavailable: {message}"))
            }
            VoteRepositoryError::Query { message } => {
                Error::internal(format!("vote repository error: {message}"))
            }
            VoteRepositoryError::Conflict { message } => {
                warn!(%message, "vote mutation lost a concurrent race");
                Error::conflict("You have already cast a vote on this item.")
            }
            VoteRepositoryError::MissingReference { message } => Error::not_found(message),
        }
    }

    async fn owner_of(&self, target: PostRef) -> Result<UserId, Error> {
        self.repo
            .find_post_owner(target)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("{} not found.", target.kind())))
    }
}

#[async_trait]
impl<R> VotesCommand for VoteService<R>
where
    R: VoteRepository,
{
    async fn cast_vote(&self, request: CastVoteRequest) -> Result<VoteOutcome, Error> {
        let CastVoteRequest {
            voter,
            target,
            direction,
        } = request;

        let owner = self.owner_of(target).await?;
        if owner == voter {
            return Err(Error::forbidden("You cannot vote on your own post."));
        }

        let existing = self
            .repo
            .find_vote(voter, target)
            .await
            .map_err(Self::map_repository_error)?;
        let decision = decide(existing.as_ref(), voter, target, direction);
        let mutation = decision.into_mutation(owner);

        self.repo
            .apply(&mutation)
            .await
            .map_err(Self::map_repository_error)?;

        info!(
            %voter,
            %target,
            %owner,
            action = %decision.action,
            owner_delta = decision.owner_delta.get(),
            "vote reconciled"
        );

        Ok(VoteOutcome {
            action: decision.action,
            target,
            direction,
            owner_delta: decision.owner_delta,
        })
    }
}

#[async_trait]
impl<R> VotesQuery for VoteService<R>
where
    R: VoteRepository,
{
    async fn vote_status(
        &self,
        voter: UserId,
        target: PostRef,
    ) -> Result<Option<VoteDirection>, Error> {
        let vote = self
            .repo
            .find_vote(voter, target)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(vote.map(|vote| vote.direction))
    }

    async fn vote_history(&self, voter: UserId) -> Result<Vec<VoteHistoryEntry>, Error> {
        self.repo
            .list_for_user(voter)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[cfg(test)]
#[path = "vote_service_tests.rs"]
mod tests;
