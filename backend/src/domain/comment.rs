//! Comments attached to a single question or answer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::content::{MissingFieldError, required_text};
use crate::domain::{AuthorSummary, CommentId, PostRef, UserId};

/// Validated input for a new comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    body: String,
    author: UserId,
    target: PostRef,
}

impl NewComment {
    /// Validate the body. The target is already a single post by construction.
    pub fn try_new(
        body: impl Into<String>,
        author: UserId,
        target: PostRef,
    ) -> Result<Self, MissingFieldError> {
        Ok(Self {
            body: required_text("body", body)?,
            author,
            target,
        })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn author(&self) -> UserId {
        self.author
    }

    pub fn target(&self) -> PostRef {
        self.target
    }
}

/// Stored comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub body: String,
    pub user_id: UserId,
    pub target: PostRef,
    pub created_at: DateTime<Utc>,
}

/// Comment joined with its author, as listed under a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    pub comment: Comment,
    pub author: AuthorSummary,
}
