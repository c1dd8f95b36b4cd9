//! Concurrent reconciliation of the same (voter, post) pair.
//!
//! Both requests are held after reading the voter's current vote, so each
//! decides to create one. The store must accept exactly one and report the
//! other as a conflict, leaving a single vote and a single reputation delta.

use std::sync::Arc;

use async_trait::async_trait;
use forum_backend::domain::ports::{
    CastVoteRequest, QuestionRepository, UserRepository, VoteRepository, VoteRepositoryError,
    VotesCommand,
};
use forum_backend::domain::{
    ErrorCode, NewQuestion, NewUser, PasswordHash, PostRef, User, UserId, Vote, VoteAction,
    VoteDirection, VoteHistoryEntry, VoteMutation, VoteService,
};
use forum_backend::outbound::memory::MemoryStore;
use rstest::rstest;
use tokio::sync::Barrier;

/// Vote repository that parks every lookup until both racers have read.
struct LockstepVotes {
    inner: Arc<MemoryStore>,
    barrier: Barrier,
}

#[async_trait]
impl VoteRepository for LockstepVotes {
    async fn find_vote(
        &self,
        voter: UserId,
        target: PostRef,
    ) -> Result<Option<Vote>, VoteRepositoryError> {
        let vote = self.inner.find_vote(voter, target).await;
        self.barrier.wait().await;
        vote
    }

    async fn find_post_owner(
        &self,
        target: PostRef,
    ) -> Result<Option<UserId>, VoteRepositoryError> {
        self.inner.find_post_owner(target).await
    }

    async fn apply(&self, mutation: &VoteMutation) -> Result<(), VoteRepositoryError> {
        self.inner.apply(mutation).await
    }

    async fn list_for_user(
        &self,
        voter: UserId,
    ) -> Result<Vec<VoteHistoryEntry>, VoteRepositoryError> {
        self.inner.list_for_user(voter).await
    }
}

async fn user(store: &MemoryStore, name: &str) -> User {
    UserRepository::create(
        store,
        &NewUser {
            username: name.to_owned(),
            email: format!("{name}@example.com"),
            password_hash: PasswordHash::new("$2b$04$unusedunusedunusedunuse"),
        },
    )
    .await
    .expect("user")
}

#[rstest]
#[tokio::test]
async fn racing_first_votes_apply_once() {
    let store = Arc::new(MemoryStore::new());
    let owner = user(&store, "owner").await;
    let voter = user(&store, "voter").await;
    let question = QuestionRepository::create(
        store.as_ref(),
        &NewQuestion::try_new("Race", "Which vote wins?", owner.id).expect("question"),
    )
    .await
    .expect("store question");
    let target = PostRef::Question(question.id);
    let service = VoteService::new(Arc::new(LockstepVotes {
        inner: store.clone(),
        barrier: Barrier::new(2),
    }));
    let request = CastVoteRequest {
        voter: voter.id,
        target,
        direction: VoteDirection::Up,
    };

    let (first, second) = tokio::join!(service.cast_vote(request), service.cast_vote(request));

    let mut outcomes = [first, second];
    outcomes.sort_by_key(Result::is_err);
    let [won, lost] = outcomes;
    assert_eq!(won.expect("one vote applies").action, VoteAction::NewVote);
    assert_eq!(lost.expect_err("one vote conflicts").code(), ErrorCode::Conflict);

    let history = store.list_for_user(voter.id).await.expect("history");
    assert_eq!(history.len(), 1);
    let owner_now = UserRepository::list(store.as_ref())
        .await
        .expect("users")
        .into_iter()
        .find(|candidate| candidate.id == owner.id)
        .expect("owner");
    assert_eq!(owner_now.reputation, 10);
}
