//! Port for tag persistence.

use async_trait::async_trait;

use crate::domain::{NewTag, Tag};

use super::define_port_error;

define_port_error! {
    /// Errors raised by tag repository adapters.
    pub enum TagRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "tag repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "tag repository query failed: {message}",
        /// A tag with the same name exists.
        Duplicate { tag_name: String } => "tag already exists: {tag_name}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Insert a tag with a unique name.
    async fn create(&self, tag: &NewTag) -> Result<Tag, TagRepositoryError>;

    /// Every tag in insertion order.
    async fn list(&self) -> Result<Vec<Tag>, TagRepositoryError>;
}

/// Fixture implementation with no tags.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTagRepository;

#[async_trait]
impl TagRepository for FixtureTagRepository {
    async fn create(&self, _tag: &NewTag) -> Result<Tag, TagRepositoryError> {
        Err(TagRepositoryError::connection(
            "fixture repository does not persist tags",
        ))
    }

    async fn list(&self) -> Result<Vec<Tag>, TagRepositoryError> {
        Ok(Vec::new())
    }
}
