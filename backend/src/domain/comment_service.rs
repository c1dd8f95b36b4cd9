//! Comment services.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    CommentRepository, CommentRepositoryError, CommentsCommand, CommentsQuery,
};
use crate::domain::{Comment, CommentView, Error, NewComment, PostRef};

/// Comment service implementing [`CommentsCommand`] and [`CommentsQuery`].
#[derive(Clone)]
pub struct CommentService<R> {
    repo: Arc<R>,
}

impl<R> CommentService<R> {
    /// Create a new service with the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_repository_error(error: CommentRepositoryError) -> Error {
    match error {
        CommentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("comment repository unavailable: {message}"))
        }
        CommentRepositoryError::Query { message } => {
            Error::internal(format!("comment repository error: {message}"))
        }
        CommentRepositoryError::MissingReference { message } => Error::not_found(message),
    }
}

#[async_trait]
impl<R> CommentsCommand for CommentService<R>
where
    R: CommentRepository,
{
    async fn create_comment(&self, comment: NewComment) -> Result<Comment, Error> {
        self.repo.create(&comment).await.map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> CommentsQuery for CommentService<R>
where
    R: CommentRepository,
{
    async fn list_comments(&self, target: PostRef) -> Result<Vec<CommentView>, Error> {
        self.repo.list_for(target).await.map_err(map_repository_error)
    }
}
