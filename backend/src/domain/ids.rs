//! Strongly typed entity identifiers.
//!
//! Every forum entity is keyed by a positive 64-bit integer assigned by the
//! store. Each entity gets its own newtype so a question id can never be
//! passed where an answer id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation error for identifiers that are zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{entity} id must be a positive integer, got {value}")]
pub struct IdValidationError {
    /// Entity label used in the message (`user`, `question`, ...).
    pub entity: &'static str,
    /// The rejected raw value.
    pub value: i64,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident => $entity:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Entity label used in validation and not-found messages.
            pub const ENTITY: &'static str = $entity;

            /// Validate and wrap a raw identifier.
            pub fn new(value: i64) -> Result<Self, IdValidationError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(IdValidationError {
                        entity: $entity,
                        value,
                    })
                }
            }

            /// Access the raw integer value.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = IdValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id! {
    /// Identifier of a registered user.
    UserId => "user"
}

define_id! {
    /// Identifier of a question.
    QuestionId => "question"
}

define_id! {
    /// Identifier of an answer.
    AnswerId => "answer"
}

define_id! {
    /// Identifier of a comment.
    CommentId => "comment"
}

define_id! {
    /// Identifier of a tag.
    TagId => "tag"
}

define_id! {
    /// Identifier of a vote record.
    VoteId => "vote"
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(-4)]
    fn rejects_non_positive_values(#[case] raw: i64) {
        let err = UserId::new(raw).expect_err("non-positive id");
        assert_eq!(err.entity, "user");
        assert_eq!(err.to_string(), format!("user id must be a positive integer, got {raw}"));
    }

    #[rstest]
    fn deserialises_through_validation() {
        let id: AnswerId = serde_json::from_str("12").expect("valid id");
        assert_eq!(id.get(), 12);
        assert!(serde_json::from_str::<AnswerId>("0").is_err());
    }
}
