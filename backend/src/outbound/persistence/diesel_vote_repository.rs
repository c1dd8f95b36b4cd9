//! PostgreSQL-backed `VoteRepository` implementation.
//!
//! `apply` writes the vote change and the owner's reputation delta in one
//! transaction. Updates and deletes are filtered on the direction the
//! decision was made against, so a concurrent change leaves zero affected
//! rows and the transaction rolls back with a conflict. Duplicate creates
//! trip the partial unique indexes `votes_user_question_key` and
//! `votes_user_answer_key`.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{VoteRepository, VoteRepositoryError};
use crate::domain::{
    AnswerId, PostRef, QuestionId, UserId, Vote, VoteChange, VoteHistoryEntry, VoteMutation,
    VoteTargetSummary,
};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, GuardedWriteError, constraint_violation, expect_single_row,
    map_basic_diesel_error, map_basic_pool_error, missing_reference_message,
};
use super::models::{NewVoteRow, RowMappingError, VoteRow, target_columns};
use super::pool::{DbPool, PoolError};
use super::schema::{answers, questions, users, votes};

const ALREADY_VOTED: &str = "voter already holds a vote on this post";
const STALE_VOTE: &str = "vote changed since it was read";

/// Diesel-backed implementation of the [`VoteRepository`] port.
#[derive(Clone)]
pub struct DieselVoteRepository {
    pool: DbPool,
}

impl DieselVoteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VoteRepositoryError {
    map_basic_pool_error(error, VoteRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> VoteRepositoryError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::Unique { .. }) => {
            return VoteRepositoryError::conflict(ALREADY_VOTED);
        }
        Some(ConstraintViolation::ForeignKey { constraint }) => {
            return VoteRepositoryError::missing_reference(missing_reference_message(
                constraint.as_deref(),
            ));
        }
        None => {}
    }
    map_basic_diesel_error(
        error,
        VoteRepositoryError::query,
        VoteRepositoryError::connection,
    )
}

fn map_guarded_error(error: GuardedWriteError) -> VoteRepositoryError {
    match error {
        GuardedWriteError::Diesel(error) => map_diesel_error(error),
        GuardedWriteError::Conflict(message) => VoteRepositoryError::conflict(message),
    }
}

fn map_row_error(error: RowMappingError) -> VoteRepositoryError {
    VoteRepositoryError::query(error.to_string())
}

async fn write_vote_change(
    conn: &mut AsyncPgConnection,
    change: VoteChange,
) -> Result<(), GuardedWriteError> {
    match change {
        VoteChange::Create {
            voter,
            target,
            direction,
        } => {
            let (question_id, answer_id) = target_columns(target);
            let row = NewVoteRow {
                user_id: voter.get(),
                question_id,
                answer_id,
                vote_type: direction.value(),
            };
            diesel::insert_into(votes::table)
                .values(&row)
                .execute(conn)
                .await?;
            Ok(())
        }
        VoteChange::Update { vote_id, from, to } => {
            let affected = diesel::update(
                votes::table
                    .filter(votes::id.eq(vote_id.get()))
                    .filter(votes::vote_type.eq(from.value())),
            )
            .set(votes::vote_type.eq(to.value()))
            .execute(conn)
            .await?;
            expect_single_row(affected, STALE_VOTE)
        }
        VoteChange::Delete { vote_id, direction } => {
            let affected = diesel::delete(
                votes::table
                    .filter(votes::id.eq(vote_id.get()))
                    .filter(votes::vote_type.eq(direction.value())),
            )
            .execute(conn)
            .await?;
            expect_single_row(affected, STALE_VOTE)
        }
    }
}

#[async_trait]
impl VoteRepository for DieselVoteRepository {
    async fn find_vote(
        &self,
        voter: UserId,
        target: PostRef,
    ) -> Result<Option<Vote>, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let query = votes::table
            .filter(votes::user_id.eq(voter.get()))
            .select(VoteRow::as_select())
            .into_boxed();
        let query = match target {
            PostRef::Question(id) => query.filter(votes::question_id.eq(id.get())),
            PostRef::Answer(id) => query.filter(votes::answer_id.eq(id.get())),
        };

        let row: Option<VoteRow> = query
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Vote::try_from).transpose().map_err(map_row_error)
    }

    async fn find_post_owner(
        &self,
        target: PostRef,
    ) -> Result<Option<UserId>, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner: Option<i64> = match target {
            PostRef::Question(id) => {
                questions::table
                    .find(id.get())
                    .select(questions::user_id)
                    .first(&mut conn)
                    .await
            }
            PostRef::Answer(id) => {
                answers::table
                    .find(id.get())
                    .select(answers::user_id)
                    .first(&mut conn)
                    .await
            }
        }
        .optional()
        .map_err(map_diesel_error)?;

        owner
            .map(UserId::new)
            .transpose()
            .map_err(|err| map_row_error(err.into()))
    }

    async fn apply(&self, mutation: &VoteMutation) -> Result<(), VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mutation = *mutation;

        conn.transaction::<_, GuardedWriteError, _>(|conn| {
            async move {
                write_vote_change(conn, mutation.change).await?;
                let affected = diesel::update(users::table.find(mutation.owner.get()))
                    .set(users::reputation.eq(users::reputation + mutation.owner_delta.get()))
                    .execute(conn)
                    .await?;
                expect_single_row(affected, "post owner no longer exists")
            }
            .scope_boxed()
        })
        .await
        .map_err(map_guarded_error)
    }

    async fn list_for_user(
        &self,
        voter: UserId,
    ) -> Result<Vec<VoteHistoryEntry>, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<VoteRow> = votes::table
            .filter(votes::user_id.eq(voter.get()))
            .order((votes::created_at.desc(), votes::id.desc()))
            .select(VoteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let question_ids: Vec<i64> = rows.iter().filter_map(|row| row.question_id).collect();
        let answer_ids: Vec<i64> = rows.iter().filter_map(|row| row.answer_id).collect();

        let titles: HashMap<i64, String> = questions::table
            .filter(questions::id.eq_any(&question_ids))
            .select((questions::id, questions::title))
            .load::<(i64, String)>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .collect();
        let bodies: HashMap<i64, String> = answers::table
            .filter(answers::id.eq_any(&answer_ids))
            .select((answers::id, answers::body))
            .load::<(i64, String)>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .collect();

        rows.into_iter()
            .map(|row| {
                let vote = Vote::try_from(row).map_err(map_row_error)?;
                let target = summarise_target(vote.target, &titles, &bodies);
                Ok(VoteHistoryEntry { vote, target })
            })
            .collect()
    }
}

fn summarise_target(
    target: PostRef,
    titles: &HashMap<i64, String>,
    bodies: &HashMap<i64, String>,
) -> VoteTargetSummary {
    match target {
        PostRef::Question(question_id) => VoteTargetSummary::Question {
            question_id,
            title: lookup(titles, question_id.get()),
        },
        PostRef::Answer(answer_id) => VoteTargetSummary::Answer {
            answer_id,
            body: lookup(bodies, answer_id.get()),
        },
    }
}

fn lookup(values: &HashMap<i64, String>, id: i64) -> String {
    values.get(&id).cloned().unwrap_or_default()
}
