//! Driving port for answer mutations, including acceptance.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{AcceptanceOutcome, Answer, AnswerId, Error, NewAnswer, UserId};

/// Request to mark an answer as the accepted one for its question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptAnswerRequest {
    /// User asking for the acceptance; must own the question.
    pub requester: UserId,
    pub answer_id: AnswerId,
}

/// Driving port for answer write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswersCommand: Send + Sync {
    /// Store an answer; unknown question or author yields `not_found`.
    async fn create_answer(&self, answer: NewAnswer) -> Result<Answer, Error>;

    /// Accept an answer, switching away from any previously accepted one.
    ///
    /// Fails with `not_found`, `forbidden` (requester does not own the
    /// question), `already_accepted`, or `conflict` when a concurrent
    /// acceptance won.
    async fn accept_answer(&self, request: AcceptAnswerRequest)
    -> Result<AcceptanceOutcome, Error>;
}
