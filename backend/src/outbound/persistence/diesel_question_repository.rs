//! PostgreSQL-backed `QuestionRepository` implementation.
//!
//! Listing joins each question with its author and folds in the vote score
//! from a grouped aggregate over `votes`.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{QuestionRepository, QuestionRepositoryError};
use crate::domain::{AuthorSummary, NewQuestion, Question, QuestionSummary};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
    missing_reference_message,
};
use super::models::{AuthorRow, NewQuestionRow, QuestionRow, RowMappingError};
use super::pool::{DbPool, PoolError};
use super::schema::{questions, users, votes};

/// Diesel-backed implementation of the [`QuestionRepository`] port.
#[derive(Clone)]
pub struct DieselQuestionRepository {
    pool: DbPool,
}

impl DieselQuestionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> QuestionRepositoryError {
    map_basic_pool_error(error, QuestionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> QuestionRepositoryError {
    if let Some(ConstraintViolation::ForeignKey { constraint }) = constraint_violation(&error) {
        return QuestionRepositoryError::missing_reference(missing_reference_message(
            constraint.as_deref(),
        ));
    }
    map_basic_diesel_error(
        error,
        QuestionRepositoryError::query,
        QuestionRepositoryError::connection,
    )
}

fn map_row_error(error: RowMappingError) -> QuestionRepositoryError {
    QuestionRepositoryError::query(error.to_string())
}

#[async_trait]
impl QuestionRepository for DieselQuestionRepository {
    async fn create(&self, question: &NewQuestion) -> Result<Question, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewQuestionRow {
            title: question.title(),
            body: question.body(),
            user_id: question.author().get(),
        };

        let stored: QuestionRow = diesel::insert_into(questions::table)
            .values(&row)
            .returning(QuestionRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Question::try_from(stored).map_err(map_row_error)
    }

    async fn list_summaries(&self) -> Result<Vec<QuestionSummary>, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(QuestionRow, AuthorRow)> = questions::table
            .inner_join(users::table)
            .order((questions::created_at.desc(), questions::id.desc()))
            .select((QuestionRow::as_select(), AuthorRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let scores: HashMap<i64, i64> = votes::table
            .filter(votes::question_id.is_not_null())
            .group_by(votes::question_id)
            .select((votes::question_id, diesel::dsl::sum(votes::vote_type)))
            .load::<(Option<i64>, Option<i64>)>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .filter_map(|(id, score)| id.map(|id| (id, score.unwrap_or(0))))
            .collect();

        rows.into_iter()
            .map(|(question, author)| {
                let score = scores.get(&question.id).copied().unwrap_or(0);
                Ok(QuestionSummary {
                    question: Question::try_from(question).map_err(map_row_error)?,
                    author: AuthorSummary::try_from(author).map_err(map_row_error)?,
                    score,
                })
            })
            .collect()
    }
}
