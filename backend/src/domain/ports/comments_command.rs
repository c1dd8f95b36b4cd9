//! Driving port for posting comments.

use async_trait::async_trait;

use crate::domain::{Comment, Error, NewComment};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsCommand: Send + Sync {
    /// Store a comment; an unknown target or author yields `not_found`.
    async fn create_comment(&self, comment: NewComment) -> Result<Comment, Error>;
}
