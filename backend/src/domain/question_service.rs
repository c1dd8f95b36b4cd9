//! Question services.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    QuestionRepository, QuestionRepositoryError, QuestionsCommand, QuestionsQuery,
};
use crate::domain::{Error, NewQuestion, Question, QuestionSummary};

/// Question service implementing [`QuestionsCommand`] and [`QuestionsQuery`].
#[derive(Clone)]
pub struct QuestionService<R> {
    repo: Arc<R>,
}

impl<R> QuestionService<R> {
    /// Create a new service with the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_repository_error(error: QuestionRepositoryError) -> Error {
    match error {
        QuestionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("question repository unavailable: {message}"))
        }
        QuestionRepositoryError::Query { message } => {
            Error::internal(format!("question repository error: {message}"))
        }
        QuestionRepositoryError::MissingReference { message } => Error::not_found(message),
    }
}

#[async_trait]
impl<R> QuestionsCommand for QuestionService<R>
where
    R: QuestionRepository,
{
    async fn create_question(&self, question: NewQuestion) -> Result<Question, Error> {
        self.repo
            .create(&question)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> QuestionsQuery for QuestionService<R>
where
    R: QuestionRepository,
{
    async fn list_questions(&self) -> Result<Vec<QuestionSummary>, Error> {
        self.repo.list_summaries().await.map_err(map_repository_error)
    }
}
