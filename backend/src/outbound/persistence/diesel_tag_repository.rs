//! PostgreSQL-backed `TagRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TagRepository, TagRepositoryError};
use crate::domain::{NewTag, Tag};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewTagRow, TagRow};
use super::pool::DbPool;
use super::schema::tags;

/// Diesel-backed implementation of the [`TagRepository`] port.
#[derive(Clone)]
pub struct DieselTagRepository {
    pool: DbPool,
}

impl DieselTagRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: diesel::result::Error, tag_name: &str) -> TagRepositoryError {
    if let Some(ConstraintViolation::Unique { .. }) = constraint_violation(&error) {
        return TagRepositoryError::duplicate(tag_name);
    }
    map_basic_diesel_error(
        error,
        TagRepositoryError::query,
        TagRepositoryError::connection,
    )
}

fn row_to_tag(row: TagRow) -> Result<Tag, TagRepositoryError> {
    Tag::try_from(row).map_err(|err| TagRepositoryError::query(err.to_string()))
}

#[async_trait]
impl TagRepository for DieselTagRepository {
    async fn create(&self, tag: &NewTag) -> Result<Tag, TagRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, TagRepositoryError::connection))?;
        let row = NewTagRow {
            tag_name: tag.tag_name(),
            description: tag.description(),
        };

        let stored: TagRow = diesel::insert_into(tags::table)
            .values(&row)
            .returning(TagRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, tag.tag_name()))?;
        row_to_tag(stored)
    }

    async fn list(&self) -> Result<Vec<Tag>, TagRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, TagRepositoryError::connection))?;
        let rows: Vec<TagRow> = tags::table
            .order(tags::id.asc())
            .select(TagRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| {
                map_basic_diesel_error(
                    err,
                    TagRepositoryError::query,
                    TagRepositoryError::connection,
                )
            })?;
        rows.into_iter().map(row_to_tag).collect()
    }
}
