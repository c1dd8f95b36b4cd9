//! Tags.

use serde::{Deserialize, Serialize};

use crate::domain::TagId;
use crate::domain::content::required_text;

/// Longest accepted tag name, in characters.
pub const TAG_NAME_MAX: usize = 64;

/// Validation errors returned by [`NewTag::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TagValidationError {
    #[error("Tag name is required")]
    MissingName,
    #[error("Tag name must be at most {max} characters long.")]
    NameTooLong { max: usize },
}

/// Validated input for a new tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    tag_name: String,
    description: Option<String>,
}

impl NewTag {
    /// Validate the name. A blank description is stored as absent.
    pub fn try_new(
        tag_name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, TagValidationError> {
        let tag_name =
            required_text("tag_name", tag_name).map_err(|_| TagValidationError::MissingName)?;
        if tag_name.chars().count() > TAG_NAME_MAX {
            return Err(TagValidationError::NameTooLong { max: TAG_NAME_MAX });
        }
        let description = description
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty());
        Ok(Self {
            tag_name,
            description,
        })
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Stored tag. Names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub tag_name: String,
    pub description: Option<String>,
}
