//! Port for comment persistence.

use async_trait::async_trait;

use crate::domain::{Comment, CommentView, NewComment, PostRef};

use super::define_port_error;

define_port_error! {
    /// Errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment repository query failed: {message}",
        /// The target post or the author does not exist.
        MissingReference { message: String } => "{message}",
    }
}

/// Storage for comments on questions and answers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a comment on `comment.target()`.
    async fn create(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError>;

    /// Comments on `target`, oldest first, with commenter details.
    async fn list_for(&self, target: PostRef) -> Result<Vec<CommentView>, CommentRepositoryError>;
}

/// Fixture implementation with no comments.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCommentRepository;

#[async_trait]
impl CommentRepository for FixtureCommentRepository {
    async fn create(&self, _comment: &NewComment) -> Result<Comment, CommentRepositoryError> {
        Err(CommentRepositoryError::connection(
            "fixture repository does not persist comments",
        ))
    }

    async fn list_for(
        &self,
        _target: PostRef,
    ) -> Result<Vec<CommentView>, CommentRepositoryError> {
        Ok(Vec::new())
    }
}
