//! Questions and their listing projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::content::{MissingFieldError, required_text};
use crate::domain::{AuthorSummary, QuestionId, UserId};

/// Validated input for posting a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    title: String,
    body: String,
    author: UserId,
}

impl NewQuestion {
    /// Validate the title and body; both must contain non-whitespace text.
    pub fn try_new(
        title: impl Into<String>,
        body: impl Into<String>,
        author: UserId,
    ) -> Result<Self, MissingFieldError> {
        Ok(Self {
            title: required_text("title", title)?,
            body: required_text("body", body)?,
            author,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn author(&self) -> UserId {
        self.author
    }
}

/// Stored question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    pub body: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Question as shown in the newest-first listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub question: Question,
    pub author: AuthorSummary,
    /// Sum of vote directions cast on the question.
    pub score: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn author() -> UserId {
        UserId::new(1).expect("valid id")
    }

    #[rstest]
    #[case("", "body", "title")]
    #[case("title", " ", "body")]
    fn blank_fields_are_rejected(
        #[case] title: &str,
        #[case] body: &str,
        #[case] field: &'static str,
    ) {
        let err = NewQuestion::try_new(title, body, author()).expect_err("blank field");
        assert_eq!(err.field, field);
    }

    #[rstest]
    fn keeps_author() {
        let question = NewQuestion::try_new("Borrowing", "How?", author()).expect("valid");
        assert_eq!(question.author(), author());
        assert_eq!(question.title(), "Borrowing");
    }
}
