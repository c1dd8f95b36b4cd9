//! Driving port for creating tags.

use async_trait::async_trait;

use crate::domain::{Error, NewTag, Tag};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagsCommand: Send + Sync {
    /// Store a tag; a duplicate name yields `conflict`.
    async fn create_tag(&self, tag: NewTag) -> Result<Tag, Error>;
}
