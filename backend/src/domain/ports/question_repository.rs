//! Port for question persistence.

use async_trait::async_trait;

use crate::domain::{NewQuestion, Question, QuestionSummary};

use super::define_port_error;

define_port_error! {
    /// Errors raised by question repository adapters.
    pub enum QuestionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "question repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "question repository query failed: {message}",
        /// A referenced row (the author) does not exist.
        MissingReference { message: String } => "{message}",
    }
}

/// Storage for questions and their listing projection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Insert a question owned by `question.author()`.
    async fn create(&self, question: &NewQuestion) -> Result<Question, QuestionRepositoryError>;

    /// All questions, newest first, with author details and vote score.
    async fn list_summaries(&self) -> Result<Vec<QuestionSummary>, QuestionRepositoryError>;
}

/// Fixture implementation that lists no questions and rejects writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureQuestionRepository;

#[async_trait]
impl QuestionRepository for FixtureQuestionRepository {
    async fn create(&self, _question: &NewQuestion) -> Result<Question, QuestionRepositoryError> {
        Err(QuestionRepositoryError::connection(
            "fixture repository does not persist questions",
        ))
    }

    async fn list_summaries(&self) -> Result<Vec<QuestionSummary>, QuestionRepositoryError> {
        Ok(Vec::new())
    }
}
