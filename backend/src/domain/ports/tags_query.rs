//! Driving port for listing tags.

use async_trait::async_trait;

use crate::domain::{Error, Tag};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagsQuery: Send + Sync {
    async fn list_tags(&self) -> Result<Vec<Tag>, Error>;
}
