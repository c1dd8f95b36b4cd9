//! Driving port for reading the answers under a question.

use async_trait::async_trait;

use crate::domain::{AnswerThread, Error, QuestionId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswersQuery: Send + Sync {
    /// Answers newest first, each with author, vote count and comments.
    async fn list_answers(&self, question_id: QuestionId) -> Result<Vec<AnswerThread>, Error>;
}
