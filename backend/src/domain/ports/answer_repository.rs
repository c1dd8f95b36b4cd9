//! Port for answer persistence and answer acceptance.
//!
//! Acceptance is split into a read ([`AnswerRepository::find_acceptance_candidate`])
//! and a conditional write ([`AnswerRepository::apply_acceptance`]). The write
//! must re-check that the question's accepted answer is still the one named
//! in [`AcceptanceChange::previous`] and that the target is still unaccepted,
//! returning [`AnswerRepositoryError::Conflict`] otherwise.

use async_trait::async_trait;

use crate::domain::{
    AcceptanceCandidate, AcceptanceChange, Answer, AnswerId, AnswerThread, NewAnswer, QuestionId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by answer repository adapters.
    pub enum AnswerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "answer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "answer repository query failed: {message}",
        /// A referenced row (question or author) does not exist.
        MissingReference { message: String } => "{message}",
        /// The accepted answer changed between read and write.
        Conflict { message: String } => "acceptance conflict: {message}",
    }
}

/// Storage for answers, their threads and acceptance state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Insert an unaccepted answer.
    async fn create(&self, answer: &NewAnswer) -> Result<Answer, AnswerRepositoryError>;

    /// Answers to `question_id`, newest first, each with author, score and
    /// comments (oldest first).
    async fn list_threads(
        &self,
        question_id: QuestionId,
    ) -> Result<Vec<AnswerThread>, AnswerRepositoryError>;

    /// Snapshot needed to decide an acceptance, or `None` if the answer does
    /// not exist.
    async fn find_acceptance_candidate(
        &self,
        answer_id: AnswerId,
    ) -> Result<Option<AcceptanceCandidate>, AnswerRepositoryError>;

    /// Apply flag and reputation changes in one atomic unit.
    async fn apply_acceptance(&self, change: &AcceptanceChange)
    -> Result<(), AnswerRepositoryError>;
}

/// Fixture implementation with no answers.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnswerRepository;

#[async_trait]
impl AnswerRepository for FixtureAnswerRepository {
    async fn create(&self, _answer: &NewAnswer) -> Result<Answer, AnswerRepositoryError> {
        Err(AnswerRepositoryError::connection(
            "fixture repository does not persist answers",
        ))
    }

    async fn list_threads(
        &self,
        _question_id: QuestionId,
    ) -> Result<Vec<AnswerThread>, AnswerRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_acceptance_candidate(
        &self,
        _answer_id: AnswerId,
    ) -> Result<Option<AcceptanceCandidate>, AnswerRepositoryError> {
        Ok(None)
    }

    async fn apply_acceptance(
        &self,
        _change: &AcceptanceChange,
    ) -> Result<(), AnswerRepositoryError> {
        Err(AnswerRepositoryError::conflict("fixture has no answers"))
    }
}
