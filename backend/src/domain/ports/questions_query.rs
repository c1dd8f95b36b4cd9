//! Driving port for the question listing.

use async_trait::async_trait;

use crate::domain::{Error, QuestionSummary};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionsQuery: Send + Sync {
    /// Questions newest first, with author and score.
    async fn list_questions(&self) -> Result<Vec<QuestionSummary>, Error>;
}
