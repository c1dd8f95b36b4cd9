//! PostgreSQL-backed `AnswerRepository` implementation.
//!
//! Acceptance runs in one transaction. Each `UPDATE` is conditional on the
//! state the decision was made against; a statement that touches no row
//! aborts the transaction with a conflict. The partial unique index
//! `answers_one_accepted_per_question` catches a concurrent first
//! acceptance.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{AnswerRepository, AnswerRepositoryError};
use crate::domain::{
    AcceptanceCandidate, AcceptanceChange, AcceptedAnswer, Answer, AnswerId, AnswerThread,
    AuthorSummary, CommentView, NewAnswer, QuestionId, ReputationDelta, UserId,
};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, GuardedWriteError, constraint_violation, expect_single_row,
    map_basic_diesel_error, map_basic_pool_error, missing_reference_message,
};
use super::diesel_comment_repository::row_to_view;
use super::models::{AnswerRow, AuthorRow, CommentRow, NewAnswerRow, RowMappingError};
use super::pool::{DbPool, PoolError};
use super::schema::{answers, comments, questions, users, votes};

const STALE_ACCEPTANCE: &str = "accepted answer changed";

/// Diesel-backed implementation of the [`AnswerRepository`] port.
#[derive(Clone)]
pub struct DieselAnswerRepository {
    pool: DbPool,
}

impl DieselAnswerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AnswerRepositoryError {
    map_basic_pool_error(error, AnswerRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AnswerRepositoryError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::ForeignKey { constraint }) => {
            AnswerRepositoryError::missing_reference(missing_reference_message(
                constraint.as_deref(),
            ))
        }
        Some(ConstraintViolation::Unique { .. }) => {
            AnswerRepositoryError::conflict(STALE_ACCEPTANCE)
        }
        None => map_basic_diesel_error(
            error,
            AnswerRepositoryError::query,
            AnswerRepositoryError::connection,
        ),
    }
}

fn map_guarded_error(error: GuardedWriteError) -> AnswerRepositoryError {
    match error {
        GuardedWriteError::Diesel(error) => map_diesel_error(error),
        GuardedWriteError::Conflict(message) => AnswerRepositoryError::conflict(message),
    }
}

fn map_row_error(error: RowMappingError) -> AnswerRepositoryError {
    AnswerRepositoryError::query(error.to_string())
}

async fn adjust_reputation(
    conn: &mut diesel_async::AsyncPgConnection,
    user: UserId,
    delta: ReputationDelta,
) -> Result<(), GuardedWriteError> {
    let affected = diesel::update(users::table.find(user.get()))
        .set(users::reputation.eq(users::reputation + delta.get()))
        .execute(conn)
        .await?;
    expect_single_row(affected, "answer author no longer exists")
}

#[async_trait]
impl AnswerRepository for DieselAnswerRepository {
    async fn create(&self, answer: &NewAnswer) -> Result<Answer, AnswerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewAnswerRow {
            question_id: answer.question_id().get(),
            user_id: answer.author().get(),
            body: answer.body(),
        };

        let stored: AnswerRow = diesel::insert_into(answers::table)
            .values(&row)
            .returning(AnswerRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Answer::try_from(stored).map_err(map_row_error)
    }

    async fn list_threads(
        &self,
        question_id: QuestionId,
    ) -> Result<Vec<AnswerThread>, AnswerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(AnswerRow, AuthorRow)> = answers::table
            .inner_join(users::table)
            .filter(answers::question_id.eq(question_id.get()))
            .order((answers::created_at.desc(), answers::id.desc()))
            .select((AnswerRow::as_select(), AuthorRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = rows.iter().map(|(answer, _)| answer.id).collect();

        let scores: HashMap<i64, i64> = votes::table
            .filter(votes::answer_id.eq_any(&ids))
            .group_by(votes::answer_id)
            .select((votes::answer_id, diesel::dsl::sum(votes::vote_type)))
            .load::<(Option<i64>, Option<i64>)>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .filter_map(|(id, score)| id.map(|id| (id, score.unwrap_or(0))))
            .collect();

        let comment_rows: Vec<(CommentRow, AuthorRow)> = comments::table
            .inner_join(users::table)
            .filter(comments::answer_id.eq_any(&ids))
            .order((comments::created_at.asc(), comments::id.asc()))
            .select((CommentRow::as_select(), AuthorRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let mut comments_by_answer: HashMap<i64, Vec<CommentView>> = HashMap::new();
        for pair in comment_rows {
            let Some(answer_id) = pair.0.answer_id else {
                continue;
            };
            let view = row_to_view(pair).map_err(map_row_error)?;
            comments_by_answer.entry(answer_id).or_default().push(view);
        }

        rows.into_iter()
            .map(|(answer, author)| {
                let vote_count = scores.get(&answer.id).copied().unwrap_or(0);
                let comments = comments_by_answer.remove(&answer.id).unwrap_or_default();
                Ok(AnswerThread {
                    answer: Answer::try_from(answer).map_err(map_row_error)?,
                    author: AuthorSummary::try_from(author).map_err(map_row_error)?,
                    vote_count,
                    comments,
                })
            })
            .collect()
    }

    async fn find_acceptance_candidate(
        &self,
        answer_id: AnswerId,
    ) -> Result<Option<AcceptanceCandidate>, AnswerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let found: Option<(i64, i64, i64, i64, bool)> = answers::table
            .inner_join(questions::table)
            .filter(answers::id.eq(answer_id.get()))
            .select((
                answers::id,
                answers::user_id,
                answers::question_id,
                questions::user_id,
                answers::is_accepted,
            ))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some((id, answer_author, question_id, question_owner, is_accepted)) = found else {
            return Ok(None);
        };

        let current: Option<(i64, i64)> = answers::table
            .filter(answers::question_id.eq(question_id))
            .filter(answers::is_accepted.eq(true))
            .select((answers::id, answers::user_id))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let to_domain = || -> Result<AcceptanceCandidate, RowMappingError> {
            let currently_accepted = current
                .map(|(answer_id, author)| {
                    Ok::<_, RowMappingError>(AcceptedAnswer {
                        answer_id: AnswerId::new(answer_id)?,
                        author: UserId::new(author)?,
                    })
                })
                .transpose()?;
            Ok(AcceptanceCandidate {
                answer_id: AnswerId::new(id)?,
                answer_author: UserId::new(answer_author)?,
                question_id: QuestionId::new(question_id)?,
                question_owner: UserId::new(question_owner)?,
                is_accepted,
                currently_accepted,
            })
        };
        to_domain().map(Some).map_err(map_row_error)
    }

    async fn apply_acceptance(
        &self,
        change: &AcceptanceChange,
    ) -> Result<(), AnswerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let change = *change;

        conn.transaction::<_, GuardedWriteError, _>(|conn| {
            async move {
                let question_id = change.question_id.get();

                if let Some(previous) = change.previous {
                    let unset = diesel::update(
                        answers::table
                            .filter(answers::id.eq(previous.answer_id.get()))
                            .filter(answers::question_id.eq(question_id))
                            .filter(answers::is_accepted.eq(true)),
                    )
                    .set(answers::is_accepted.eq(false))
                    .execute(conn)
                    .await?;
                    expect_single_row(unset, STALE_ACCEPTANCE)?;
                    adjust_reputation(conn, previous.author, -change.bonus).await?;
                }

                let set = diesel::update(
                    answers::table
                        .filter(answers::id.eq(change.accepted.answer_id.get()))
                        .filter(answers::question_id.eq(question_id))
                        .filter(answers::is_accepted.eq(false)),
                )
                .set(answers::is_accepted.eq(true))
                .execute(conn)
                .await?;
                expect_single_row(set, STALE_ACCEPTANCE)?;
                adjust_reputation(conn, change.accepted.author, change.bonus).await
            }
            .scope_boxed()
        })
        .await
        .map_err(map_guarded_error)
    }
}
