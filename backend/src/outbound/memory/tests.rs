//! Conditional-write and projection behaviour of the in-memory store.

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    AnswerRepository, AnswerRepositoryError, CommentRepository, QuestionRepository,
    QuestionRepositoryError, UserPersistenceError, UserRepository, VoteRepository,
    VoteRepositoryError,
};
use crate::domain::{
    AcceptanceChange, AcceptedAnswer, Answer, NewAnswer, NewComment, NewQuestion, NewUser,
    PasswordHash, PostRef, Question, ReputationDelta, User, VoteChange, VoteDirection,
    VoteMutation, VoteTargetSummary,
};

struct Seeded {
    store: MemoryStore,
    asker: User,
    helper: User,
    voter: User,
    question: Question,
    answer: Answer,
}

async fn register(store: &MemoryStore, name: &str) -> User {
    let new_user = NewUser {
        username: name.to_owned(),
        email: format!("{name}@example.com"),
        password_hash: PasswordHash::new("$2b$04$unusedunusedunusedunuse"),
    };
    UserRepository::create(store, &new_user)
        .await
        .expect("register user")
}

#[fixture]
async fn seeded() -> Seeded {
    let store = MemoryStore::new();
    let asker = register(&store, "asker").await;
    let helper = register(&store, "helper").await;
    let voter = register(&store, "voter").await;
    let question = QuestionRepository::create(
        &store,
        &NewQuestion::try_new("Pinning", "What is Pin?", asker.id).expect("question"),
    )
    .await
    .expect("store question");
    let answer = AnswerRepository::create(
        &store,
        &NewAnswer::try_new(question.id, helper.id, "A pointer wrapper").expect("answer"),
    )
    .await
    .expect("store answer");
    Seeded {
        store,
        asker,
        helper,
        voter,
        question,
        answer,
    }
}

async fn reputation_of(store: &MemoryStore, user: &User) -> i64 {
    UserRepository::list(store)
        .await
        .expect("list users")
        .into_iter()
        .find(|candidate| candidate.id == user.id)
        .map(|candidate| candidate.reputation)
        .expect("user present")
}

#[rstest]
#[tokio::test]
async fn duplicate_username_is_reported(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    let duplicate = NewUser {
        username: "asker".into(),
        email: "other@example.com".into(),
        password_hash: PasswordHash::new("x"),
    };
    let err = UserRepository::create(&seeded.store, &duplicate)
        .await
        .expect_err("duplicate");
    assert!(matches!(err, UserPersistenceError::Duplicate { .. }));
}

#[rstest]
#[tokio::test]
async fn unknown_author_is_missing_reference() {
    let store = MemoryStore::new();
    let author = crate::domain::UserId::new(42).expect("user id");
    let question = NewQuestion::try_new("t", "b", author).expect("question");
    let err = QuestionRepository::create(&store, &question)
        .await
        .expect_err("unknown author");
    assert_eq!(err, QuestionRepositoryError::missing_reference("user not found"));
}

#[rstest]
#[tokio::test]
async fn second_create_for_same_pair_conflicts_without_writing(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    let target = PostRef::Answer(seeded.answer.id);
    let mutation = VoteMutation {
        change: VoteChange::Create {
            voter: seeded.voter.id,
            target,
            direction: VoteDirection::Up,
        },
        owner: seeded.helper.id,
        owner_delta: ReputationDelta::new(10),
    };

    seeded.store.apply(&mutation).await.expect("first vote");
    let err = seeded.store.apply(&mutation).await.expect_err("second vote");

    assert!(matches!(err, VoteRepositoryError::Conflict { .. }));
    assert_eq!(reputation_of(&seeded.store, &seeded.helper).await, 10);
}

#[rstest]
#[tokio::test]
async fn unknown_voter_is_missing_reference_not_conflict(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    let ghost = crate::domain::UserId::new(999).expect("user id");
    let mutation = VoteMutation {
        change: VoteChange::Create {
            voter: ghost,
            target: PostRef::Question(seeded.question.id),
            direction: VoteDirection::Up,
        },
        owner: seeded.asker.id,
        owner_delta: ReputationDelta::new(10),
    };

    let err = seeded.store.apply(&mutation).await.expect_err("unknown voter");

    assert_eq!(err, VoteRepositoryError::missing_reference("user not found"));
    assert_eq!(reputation_of(&seeded.store, &seeded.asker).await, 0);
}

#[rstest]
#[tokio::test]
async fn stale_delete_conflicts(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    let target = PostRef::Question(seeded.question.id);
    seeded
        .store
        .apply(&VoteMutation {
            change: VoteChange::Create {
                voter: seeded.voter.id,
                target,
                direction: VoteDirection::Down,
            },
            owner: seeded.asker.id,
            owner_delta: ReputationDelta::new(-2),
        })
        .await
        .expect("downvote");
    let vote = seeded
        .store
        .find_vote(seeded.voter.id, target)
        .await
        .expect("lookup")
        .expect("vote stored");

    let stale = VoteMutation {
        change: VoteChange::Delete {
            vote_id: vote.id,
            direction: VoteDirection::Up,
        },
        owner: seeded.asker.id,
        owner_delta: ReputationDelta::new(-10),
    };
    let err = seeded.store.apply(&stale).await.expect_err("stale delete");

    assert!(matches!(err, VoteRepositoryError::Conflict { .. }));
    assert_eq!(reputation_of(&seeded.store, &seeded.asker).await, -2);
}

#[rstest]
#[tokio::test]
async fn acceptance_requires_unchanged_previous(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    let change = AcceptanceChange {
        question_id: seeded.question.id,
        accepted: AcceptedAnswer {
            answer_id: seeded.answer.id,
            author: seeded.helper.id,
        },
        previous: None,
        bonus: ReputationDelta::new(15),
    };
    seeded
        .store
        .apply_acceptance(&change)
        .await
        .expect("first acceptance");
    let err = seeded
        .store
        .apply_acceptance(&change)
        .await
        .expect_err("replayed acceptance");

    assert!(matches!(err, AnswerRepositoryError::Conflict { .. }));
    assert_eq!(reputation_of(&seeded.store, &seeded.helper).await, 15);
}

#[rstest]
#[tokio::test]
async fn threads_carry_score_and_comments(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    let target = PostRef::Answer(seeded.answer.id);
    seeded
        .store
        .apply(&VoteMutation {
            change: VoteChange::Create {
                voter: seeded.voter.id,
                target,
                direction: VoteDirection::Up,
            },
            owner: seeded.helper.id,
            owner_delta: ReputationDelta::new(10),
        })
        .await
        .expect("upvote");
    for body in ["first", "second"] {
        CommentRepository::create(
            &seeded.store,
            &NewComment::try_new(body, seeded.asker.id, target).expect("comment"),
        )
        .await
        .expect("store comment");
    }

    let threads = seeded
        .store
        .list_threads(seeded.question.id)
        .await
        .expect("threads");

    assert_eq!(threads.len(), 1);
    let thread = &threads[0];
    assert_eq!(thread.vote_count, 1);
    assert_eq!(thread.author.reputation, 10);
    let bodies: Vec<_> = thread
        .comments
        .iter()
        .map(|view| view.comment.body.as_str())
        .collect();
    assert_eq!(bodies, ["first", "second"]);
}

#[rstest]
#[tokio::test]
async fn history_summarises_targets_newest_first(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    for (target, owner) in [
        (PostRef::Question(seeded.question.id), seeded.asker.id),
        (PostRef::Answer(seeded.answer.id), seeded.helper.id),
    ] {
        seeded
            .store
            .apply(&VoteMutation {
                change: VoteChange::Create {
                    voter: seeded.voter.id,
                    target,
                    direction: VoteDirection::Up,
                },
                owner,
                owner_delta: ReputationDelta::new(10),
            })
            .await
            .expect("vote");
    }

    let history = seeded
        .store
        .list_for_user(seeded.voter.id)
        .await
        .expect("history");

    assert_eq!(history.len(), 2);
    assert!(matches!(
        &history[0].target,
        VoteTargetSummary::Answer { body, .. } if body == "A pointer wrapper"
    ));
    assert!(matches!(
        &history[1].target,
        VoteTargetSummary::Question { title, .. } if title == "Pinning"
    ));
}
