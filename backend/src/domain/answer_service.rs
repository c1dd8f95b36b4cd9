//! Answer services, including accept-answer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    AcceptAnswerRequest, AnswerRepository, AnswerRepositoryError, AnswersCommand, AnswersQuery,
};
use crate::domain::{
    AcceptanceOutcome, AcceptanceRejection, Answer, AnswerThread, Error, NewAnswer, QuestionId,
};

/// Answer service implementing [`AnswersCommand`] and [`AnswersQuery`].
#[derive(Clone)]
pub struct AnswerService<R> {
    repo: Arc<R>,
}

impl<R> AnswerService<R> {
    /// Create a new service with the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> AnswerService<R>
where
    R: AnswerRepository,
{
    fn map_repository_error(error: AnswerRepositoryError) -> Error {
        match error {
            AnswerRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("answer repository unavailable: {message}"))
            }
            AnswerRepositoryError::Query { message } => {
                Error::internal(format!("answer repository error: {message}"))
            }
            AnswerRepositoryError::MissingReference { message } => Error::not_found(message),
            AnswerRepositoryError::Conflict { message } => {
                warn!(%message, "answer acceptance lost a concurrent race");
                Error::conflict("The accepted answer changed; reload and try again.")
            }
        }
    }

    fn map_rejection(rejection: AcceptanceRejection) -> Error {
        match rejection {
            AcceptanceRejection::NotQuestionOwner => Error::forbidden(rejection.to_string()),
            AcceptanceRejection::AlreadyAccepted => Error::already_accepted(rejection.to_string()),
        }
    }
}

#[async_trait]
impl<R> AnswersCommand for AnswerService<R>
where
    R: AnswerRepository,
{
    async fn create_answer(&self, answer: NewAnswer) -> Result<Answer, Error> {
        self.repo
            .create(&answer)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn accept_answer(
        &self,
        request: AcceptAnswerRequest,
    ) -> Result<AcceptanceOutcome, Error> {
        let candidate = self
            .repo
            .find_acceptance_candidate(request.answer_id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found("Answer not found"))?;

        let change = candidate
            .plan(request.requester)
            .map_err(Self::map_rejection)?;

        self.repo
            .apply_acceptance(&change)
            .await
            .map_err(Self::map_repository_error)?;

        let outcome = AcceptanceOutcome::from(&change);
        info!(
            question_id = %outcome.question_id,
            accepted = %outcome.accepted_answer_id,
            previous = ?outcome.previous_answer_id.map(|id| id.get()),
            "answer accepted"
        );
        Ok(outcome)
    }
}

#[async_trait]
impl<R> AnswersQuery for AnswerService<R>
where
    R: AnswerRepository,
{
    async fn list_answers(&self, question_id: QuestionId) -> Result<Vec<AnswerThread>, Error> {
        self.repo
            .list_threads(question_id)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockAnswerRepository;
    use crate::domain::{
        ACCEPTED_ANSWER_BONUS, AcceptanceCandidate, AcceptanceChange, AcceptedAnswer, AnswerId,
        ErrorCode, UserId,
    };
    use rstest::{fixture, rstest};

    fn user(raw: i64) -> UserId {
        UserId::new(raw).expect("user id")
    }

    fn answer_id(raw: i64) -> AnswerId {
        AnswerId::new(raw).expect("answer id")
    }

    #[fixture]
    fn candidate() -> AcceptanceCandidate {
        AcceptanceCandidate {
            answer_id: answer_id(21),
            answer_author: user(3),
            question_id: QuestionId::new(4).expect("question id"),
            question_owner: user(1),
            is_accepted: false,
            currently_accepted: Some(AcceptedAnswer {
                answer_id: answer_id(20),
                author: user(2),
            }),
        }
    }

    fn accept(requester: i64) -> AcceptAnswerRequest {
        AcceptAnswerRequest {
            requester: user(requester),
            answer_id: answer_id(21),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn switching_acceptance_moves_bonus(candidate: AcceptanceCandidate) {
        let mut repo = MockAnswerRepository::new();
        repo.expect_find_acceptance_candidate()
            .times(1)
            .return_once(move |_| Ok(Some(candidate)));
        repo.expect_apply_acceptance()
            .withf(|change: &AcceptanceChange| {
                change.accepted.author == user(3)
                    && change.previous.map(|previous| previous.author) == Some(user(2))
                    && change.bonus == ACCEPTED_ANSWER_BONUS
            })
            .times(1)
            .return_once(|_| Ok(()));

        let service = AnswerService::new(Arc::new(repo));
        let outcome = service.accept_answer(accept(1)).await.expect("accepted");

        assert_eq!(outcome.accepted_answer_id, answer_id(21));
        assert_eq!(outcome.previous_answer_id, Some(answer_id(20)));
    }

    #[rstest]
    #[tokio::test]
    async fn missing_answer_is_not_found() {
        let mut repo = MockAnswerRepository::new();
        repo.expect_find_acceptance_candidate()
            .times(1)
            .return_once(|_| Ok(None));
        repo.expect_apply_acceptance().times(0);

        let service = AnswerService::new(Arc::new(repo));
        let err = service.accept_answer(accept(1)).await.expect_err("missing");

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Answer not found");
    }

    #[rstest]
    #[case(2, false, ErrorCode::Forbidden)]
    #[case(1, true, ErrorCode::AlreadyAccepted)]
    #[tokio::test]
    async fn rejected_acceptance_writes_nothing(
        mut candidate: AcceptanceCandidate,
        #[case] requester: i64,
        #[case] already_accepted: bool,
        #[case] expected: ErrorCode,
    ) {
        candidate.is_accepted = already_accepted;
        let mut repo = MockAnswerRepository::new();
        repo.expect_find_acceptance_candidate()
            .times(1)
            .return_once(move |_| Ok(Some(candidate)));
        repo.expect_apply_acceptance().times(0);

        let service = AnswerService::new(Arc::new(repo));
        let err = service
            .accept_answer(accept(requester))
            .await
            .expect_err("rejected");

        assert_eq!(err.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn concurrent_switch_is_conflict(candidate: AcceptanceCandidate) {
        let mut repo = MockAnswerRepository::new();
        repo.expect_find_acceptance_candidate()
            .times(1)
            .return_once(move |_| Ok(Some(candidate)));
        repo.expect_apply_acceptance()
            .times(1)
            .return_once(|_| Err(AnswerRepositoryError::conflict("accepted answer moved")));

        let service = AnswerService::new(Arc::new(repo));
        let err = service.accept_answer(accept(1)).await.expect_err("conflict");

        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_question_on_create_is_not_found() {
        let mut repo = MockAnswerRepository::new();
        repo.expect_create()
            .times(1)
            .return_once(|_| Err(AnswerRepositoryError::missing_reference("question not found")));

        let service = AnswerService::new(Arc::new(repo));
        let answer = NewAnswer::try_new(QuestionId::new(99).expect("question id"), user(1), "Use Rc")
            .expect("valid answer");
        let err = service.create_answer(answer).await.expect_err("missing question");

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "question not found");
    }
}
