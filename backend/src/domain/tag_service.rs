//! Tag services.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{TagRepository, TagRepositoryError, TagsCommand, TagsQuery};
use crate::domain::{Error, NewTag, Tag};

/// Tag service implementing [`TagsCommand`] and [`TagsQuery`].
#[derive(Clone)]
pub struct TagService<R> {
    repo: Arc<R>,
}

impl<R> TagService<R> {
    /// Create a new service with the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_repository_error(error: TagRepositoryError) -> Error {
    match error {
        TagRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("tag repository unavailable: {message}"))
        }
        TagRepositoryError::Query { message } => {
            Error::internal(format!("tag repository error: {message}"))
        }
        TagRepositoryError::Duplicate { .. } => Error::conflict("Tag already exists"),
    }
}

#[async_trait]
impl<R> TagsCommand for TagService<R>
where
    R: TagRepository,
{
    async fn create_tag(&self, tag: NewTag) -> Result<Tag, Error> {
        self.repo.create(&tag).await.map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> TagsQuery for TagService<R>
where
    R: TagRepository,
{
    async fn list_tags(&self) -> Result<Vec<Tag>, Error> {
        self.repo.list().await.map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{FixtureTagRepository, MockTagRepository};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn duplicate_name_is_conflict() {
        let mut repo = MockTagRepository::new();
        repo.expect_create()
            .times(1)
            .return_once(|tag| Err(TagRepositoryError::duplicate(tag.tag_name())));

        let service = TagService::new(Arc::new(repo));
        let tag = NewTag::try_new("rust", None).expect("valid tag");
        let err = service.create_tag(tag).await.expect_err("duplicate");

        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), "Tag already exists");
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_lists_nothing() {
        let service = TagService::new(Arc::new(FixtureTagRepository));
        assert!(service.list_tags().await.expect("tags").is_empty());
    }
}
