//! Answers, their threaded listing and the accept-answer decision.
//!
//! Acceptance is decided here as a pure function over an
//! [`AcceptanceCandidate`] snapshot; the repository then applies the
//! resulting [`AcceptanceChange`] atomically and rejects it if the accepted
//! answer changed since the snapshot was read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::content::{MissingFieldError, required_text};
use crate::domain::reputation::ACCEPTED_ANSWER_BONUS;
use crate::domain::{AnswerId, AuthorSummary, CommentView, QuestionId, ReputationDelta, UserId};

/// Validated input for posting an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    question_id: QuestionId,
    author: UserId,
    body: String,
}

impl NewAnswer {
    /// Validate the answer body.
    pub fn try_new(
        question_id: QuestionId,
        author: UserId,
        body: impl Into<String>,
    ) -> Result<Self, MissingFieldError> {
        Ok(Self {
            question_id,
            author,
            body: required_text("body", body)?,
        })
    }

    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    pub fn author(&self) -> UserId {
        self.author
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Stored answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub question_id: QuestionId,
    pub user_id: UserId,
    pub body: String,
    pub is_accepted: bool,
    pub created_at: DateTime<Utc>,
}

/// Answer with author, score and comments, as listed under a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerThread {
    pub answer: Answer,
    pub author: AuthorSummary,
    /// Sum of vote directions cast on the answer.
    pub vote_count: i64,
    /// Comments, oldest first.
    pub comments: Vec<CommentView>,
}

/// An accepted answer and the user who wrote it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptedAnswer {
    pub answer_id: AnswerId,
    pub author: UserId,
}

/// Snapshot of everything the accept decision depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptanceCandidate {
    pub answer_id: AnswerId,
    pub answer_author: UserId,
    pub question_id: QuestionId,
    pub question_owner: UserId,
    pub is_accepted: bool,
    /// The answer currently accepted on the same question, if any.
    pub currently_accepted: Option<AcceptedAnswer>,
}

/// Atomic write produced by a successful accept decision.
///
/// `previous` is both the answer to unset and the state the write is
/// conditional on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptanceChange {
    pub question_id: QuestionId,
    pub accepted: AcceptedAnswer,
    pub previous: Option<AcceptedAnswer>,
    pub bonus: ReputationDelta,
}

/// Reasons an acceptance request is refused before any write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AcceptanceRejection {
    #[error("Only the question owner can accept an answer.")]
    NotQuestionOwner,
    #[error("This answer is already accepted.")]
    AlreadyAccepted,
}

impl AcceptanceCandidate {
    /// Decide whether `requester` may accept this answer.
    ///
    /// # Examples
    /// ```
    /// use forum_backend::domain::{
    ///     AcceptanceCandidate, AcceptanceRejection, AnswerId, QuestionId, UserId,
    /// };
    ///
    /// let owner = UserId::new(1).expect("user id");
    /// let candidate = AcceptanceCandidate {
    ///     answer_id: AnswerId::new(7).expect("answer id"),
    ///     answer_author: UserId::new(2).expect("user id"),
    ///     question_id: QuestionId::new(3).expect("question id"),
    ///     question_owner: owner,
    ///     is_accepted: false,
    ///     currently_accepted: None,
    /// };
    /// let stranger = UserId::new(9).expect("user id");
    /// assert_eq!(candidate.plan(stranger), Err(AcceptanceRejection::NotQuestionOwner));
    /// assert_eq!(candidate.plan(owner).map(|change| change.bonus.get()), Ok(15));
    /// ```
    pub fn plan(&self, requester: UserId) -> Result<AcceptanceChange, AcceptanceRejection> {
        if requester != self.question_owner {
            return Err(AcceptanceRejection::NotQuestionOwner);
        }
        if self.is_accepted {
            return Err(AcceptanceRejection::AlreadyAccepted);
        }
        let previous = self
            .currently_accepted
            .filter(|accepted| accepted.answer_id != self.answer_id);
        Ok(AcceptanceChange {
            question_id: self.question_id,
            accepted: AcceptedAnswer {
                answer_id: self.answer_id,
                author: self.answer_author,
            },
            previous,
            bonus: ACCEPTED_ANSWER_BONUS,
        })
    }
}

/// Result reported after an acceptance is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptanceOutcome {
    pub question_id: QuestionId,
    pub accepted_answer_id: AnswerId,
    /// Answer that lost its accepted flag, if acceptance switched.
    pub previous_answer_id: Option<AnswerId>,
}

impl From<&AcceptanceChange> for AcceptanceOutcome {
    fn from(change: &AcceptanceChange) -> Self {
        Self {
            question_id: change.question_id,
            accepted_answer_id: change.accepted.answer_id,
            previous_answer_id: change.previous.map(|previous| previous.answer_id),
        }
    }
}
