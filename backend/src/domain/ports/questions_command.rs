//! Driving port for posting questions.

use async_trait::async_trait;

use crate::domain::{Error, NewQuestion, Question};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionsCommand: Send + Sync {
    /// Store a question; an unknown author yields `not_found`.
    async fn create_question(&self, question: NewQuestion) -> Result<Question, Error>;
}
