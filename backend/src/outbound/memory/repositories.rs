//! Port implementations for [`MemoryStore`].

use async_trait::async_trait;

use super::{MemoryStore, StoreError};
use crate::domain::ports::{
    AnswerRepository, AnswerRepositoryError, CommentRepository, CommentRepositoryError,
    QuestionRepository, QuestionRepositoryError, TagRepository, TagRepositoryError,
    UserPersistenceError, UserRepository, VoteRepository, VoteRepositoryError,
};
use crate::domain::{
    AcceptanceCandidate, AcceptanceChange, Answer, AnswerId, AnswerThread, Comment, CommentView,
    NewAnswer, NewComment, NewQuestion, NewTag, NewUser, PostRef, Question, QuestionId,
    QuestionSummary, Tag, User, UserId, Vote, VoteHistoryEntry, VoteMutation,
};

const POISONED: &str = "memory store lock poisoned";

impl From<StoreError> for UserPersistenceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Duplicate(message) => Self::duplicate(message),
            StoreError::Poisoned => Self::query(POISONED),
            StoreError::MissingReference(message)
            | StoreError::Conflict(message)
            | StoreError::Corrupt(message) => Self::query(message),
        }
    }
}

impl From<StoreError> for QuestionRepositoryError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::MissingReference(message) => Self::missing_reference(message),
            StoreError::Poisoned => Self::query(POISONED),
            StoreError::Duplicate(message)
            | StoreError::Conflict(message)
            | StoreError::Corrupt(message) => Self::query(message),
        }
    }
}

impl From<StoreError> for AnswerRepositoryError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::MissingReference(message) => Self::missing_reference(message),
            StoreError::Conflict(message) => Self::conflict(message),
            StoreError::Poisoned => Self::query(POISONED),
            StoreError::Duplicate(message) | StoreError::Corrupt(message) => Self::query(message),
        }
    }
}

impl From<StoreError> for CommentRepositoryError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::MissingReference(message) => Self::missing_reference(message),
            StoreError::Poisoned => Self::query(POISONED),
            StoreError::Duplicate(message)
            | StoreError::Conflict(message)
            | StoreError::Corrupt(message) => Self::query(message),
        }
    }
}

impl From<StoreError> for TagRepositoryError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Duplicate(tag_name) => Self::duplicate(tag_name),
            StoreError::Poisoned => Self::query(POISONED),
            StoreError::MissingReference(message)
            | StoreError::Conflict(message)
            | StoreError::Corrupt(message) => Self::query(message),
        }
    }
}

impl From<StoreError> for VoteRepositoryError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Conflict(message) => Self::conflict(message),
            StoreError::MissingReference(message) => Self::missing_reference(message),
            StoreError::Poisoned => Self::query(POISONED),
            StoreError::Duplicate(message) | StoreError::Corrupt(message) => Self::query(message),
        }
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        self.with_state(|state| state.insert_user(user)).map_err(Into::into)
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        self.with_state(|state| Ok(state.users())).map_err(Into::into)
    }
}

#[async_trait]
impl QuestionRepository for MemoryStore {
    async fn create(&self, question: &NewQuestion) -> Result<Question, QuestionRepositoryError> {
        self.with_state(|state| state.insert_question(question)).map_err(Into::into)
    }

    async fn list_summaries(&self) -> Result<Vec<QuestionSummary>, QuestionRepositoryError> {
        self.with_state(|state| state.question_summaries()).map_err(Into::into)
    }
}

#[async_trait]
impl AnswerRepository for MemoryStore {
    async fn create(&self, answer: &NewAnswer) -> Result<Answer, AnswerRepositoryError> {
        self.with_state(|state| state.insert_answer(answer)).map_err(Into::into)
    }

    async fn list_threads(
        &self,
        question_id: QuestionId,
    ) -> Result<Vec<AnswerThread>, AnswerRepositoryError> {
        self.with_state(|state| state.answer_threads(question_id)).map_err(Into::into)
    }

    async fn find_acceptance_candidate(
        &self,
        answer_id: AnswerId,
    ) -> Result<Option<AcceptanceCandidate>, AnswerRepositoryError> {
        self.with_state(|state| state.acceptance_candidate(answer_id)).map_err(Into::into)
    }

    async fn apply_acceptance(
        &self,
        change: &AcceptanceChange,
    ) -> Result<(), AnswerRepositoryError> {
        self.with_state(|state| state.apply_acceptance(change)).map_err(Into::into)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn create(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError> {
        self.with_state(|state| state.insert_comment(comment)).map_err(Into::into)
    }

    async fn list_for(&self, target: PostRef) -> Result<Vec<CommentView>, CommentRepositoryError> {
        self.with_state(|state| state.comment_views(target)).map_err(Into::into)
    }
}

#[async_trait]
impl TagRepository for MemoryStore {
    async fn create(&self, tag: &NewTag) -> Result<Tag, TagRepositoryError> {
        self.with_state(|state| state.insert_tag(tag)).map_err(Into::into)
    }

    async fn list(&self) -> Result<Vec<Tag>, TagRepositoryError> {
        self.with_state(|state| Ok(state.tags())).map_err(Into::into)
    }
}

#[async_trait]
impl VoteRepository for MemoryStore {
    async fn find_vote(
        &self,
        voter: UserId,
        target: PostRef,
    ) -> Result<Option<Vote>, VoteRepositoryError> {
        self.with_state(|state| Ok(state.find_vote(voter, target))).map_err(Into::into)
    }

    async fn find_post_owner(
        &self,
        target: PostRef,
    ) -> Result<Option<UserId>, VoteRepositoryError> {
        self.with_state(|state| Ok(state.post_owner(target))).map_err(Into::into)
    }

    async fn apply(&self, mutation: &VoteMutation) -> Result<(), VoteRepositoryError> {
        self.with_state(|state| state.apply_vote(mutation)).map_err(Into::into)
    }

    async fn list_for_user(
        &self,
        voter: UserId,
    ) -> Result<Vec<VoteHistoryEntry>, VoteRepositoryError> {
        self.with_state(|state| state.vote_history(voter)).map_err(Into::into)
    }
}
