//! Driving port for listing the comments on a post.

use async_trait::async_trait;

use crate::domain::{CommentView, Error, PostRef};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsQuery: Send + Sync {
    /// Comments on `target`, oldest first.
    async fn list_comments(&self, target: PostRef) -> Result<Vec<CommentView>, Error>;
}
