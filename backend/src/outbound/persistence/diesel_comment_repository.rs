//! PostgreSQL-backed `CommentRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{AuthorSummary, Comment, CommentView, NewComment, PostRef};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
    missing_reference_message,
};
use super::models::{AuthorRow, CommentRow, NewCommentRow, RowMappingError, target_columns};
use super::pool::{DbPool, PoolError};
use super::schema::{comments, users};

/// Diesel-backed implementation of the [`CommentRepository`] port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CommentRepositoryError {
    map_basic_pool_error(error, CommentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CommentRepositoryError {
    if let Some(ConstraintViolation::ForeignKey { constraint }) = constraint_violation(&error) {
        return CommentRepositoryError::missing_reference(missing_reference_message(
            constraint.as_deref(),
        ));
    }
    map_basic_diesel_error(
        error,
        CommentRepositoryError::query,
        CommentRepositoryError::connection,
    )
}

fn map_row_error(error: RowMappingError) -> CommentRepositoryError {
    CommentRepositoryError::query(error.to_string())
}

/// Convert a joined comment/author row pair into a view.
pub(super) fn row_to_view(
    (comment, author): (CommentRow, AuthorRow),
) -> Result<CommentView, RowMappingError> {
    Ok(CommentView {
        comment: Comment::try_from(comment)?,
        author: AuthorSummary::try_from(author)?,
    })
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn create(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (question_id, answer_id) = target_columns(comment.target());
        let row = NewCommentRow {
            body: comment.body(),
            user_id: comment.author().get(),
            question_id,
            answer_id,
        };

        let stored: CommentRow = diesel::insert_into(comments::table)
            .values(&row)
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Comment::try_from(stored).map_err(map_row_error)
    }

    async fn list_for(&self, target: PostRef) -> Result<Vec<CommentView>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let query = comments::table
            .inner_join(users::table)
            .order((comments::created_at.asc(), comments::id.asc()))
            .select((CommentRow::as_select(), AuthorRow::as_select()))
            .into_boxed();
        let query = match target {
            PostRef::Question(id) => query.filter(comments::question_id.eq(id.get())),
            PostRef::Answer(id) => query.filter(comments::answer_id.eq(id.get())),
        };

        let rows: Vec<(CommentRow, AuthorRow)> =
            query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|pair| row_to_view(pair).map_err(map_row_error))
            .collect()
    }
}
