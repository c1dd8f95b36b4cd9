//! Posts: the votable and commentable union of questions and answers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{AnswerId, IdValidationError, QuestionId};

/// Discriminant of a [`PostRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    Question,
    Answer,
}

impl PostKind {
    /// Lower-case label used in messages and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Answer => "answer",
        }
    }
}

impl fmt::Display for PostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to exactly one question or answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum PostRef {
    Question(QuestionId),
    Answer(AnswerId),
}

/// Reasons a pair of optional post identifiers is not a valid [`PostRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PostRefError {
    /// Neither identifier was supplied.
    #[error("either question_id or answer_id is required")]
    Missing,
    /// Both identifiers were supplied.
    #[error("provide question_id or answer_id, not both")]
    Ambiguous,
    /// The supplied identifier is not a positive integer.
    #[error(transparent)]
    InvalidId(#[from] IdValidationError),
}

impl PostRef {
    /// Build a reference from the `question_id`/`answer_id` pair used by the
    /// request payloads. Exactly one must be present.
    ///
    /// # Examples
    /// ```
    /// use forum_backend::domain::{PostKind, PostRef, PostRefError};
    ///
    /// let target = PostRef::from_parts(Some(3), None).expect("question target");
    /// assert_eq!(target.kind(), PostKind::Question);
    /// assert_eq!(PostRef::from_parts(None, None), Err(PostRefError::Missing));
    /// ```
    pub fn from_parts(
        question_id: Option<i64>,
        answer_id: Option<i64>,
    ) -> Result<Self, PostRefError> {
        match (question_id, answer_id) {
            (Some(_), Some(_)) => Err(PostRefError::Ambiguous),
            (Some(raw), None) => Ok(Self::Question(QuestionId::new(raw)?)),
            (None, Some(raw)) => Ok(Self::Answer(AnswerId::new(raw)?)),
            (None, None) => Err(PostRefError::Missing),
        }
    }

    /// Which kind of post is referenced.
    pub fn kind(self) -> PostKind {
        match self {
            Self::Question(_) => PostKind::Question,
            Self::Answer(_) => PostKind::Answer,
        }
    }

    /// Raw identifier of the referenced post.
    pub fn raw_id(self) -> i64 {
        match self {
            Self::Question(id) => id.get(),
            Self::Answer(id) => id.get(),
        }
    }

    /// Question identifier, when this references a question.
    pub fn question_id(self) -> Option<QuestionId> {
        match self {
            Self::Question(id) => Some(id),
            Self::Answer(_) => None,
        }
    }

    /// Answer identifier, when this references an answer.
    pub fn answer_id(self) -> Option<AnswerId> {
        match self {
            Self::Question(_) => None,
            Self::Answer(id) => Some(id),
        }
    }
}

impl fmt::Display for PostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.raw_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(1), Some(2), PostRefError::Ambiguous)]
    #[case(None, None, PostRefError::Missing)]
    fn rejects_wrong_arity(
        #[case] question_id: Option<i64>,
        #[case] answer_id: Option<i64>,
        #[case] expected: PostRefError,
    ) {
        assert_eq!(PostRef::from_parts(question_id, answer_id), Err(expected));
    }

    #[rstest]
    fn rejects_non_positive_identifier() {
        let err = PostRef::from_parts(None, Some(0)).expect_err("invalid id");
        assert!(matches!(err, PostRefError::InvalidId(_)));
    }

    #[rstest]
    fn displays_kind_and_id() {
        let target = PostRef::from_parts(None, Some(9)).expect("answer target");
        assert_eq!(target.to_string(), "answer 9");
        assert_eq!(target.answer_id().map(AnswerId::get), Some(9));
        assert!(target.question_id().is_none());
    }
}
