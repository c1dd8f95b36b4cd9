//! Answers API handlers, including answer acceptance.
//!
//! ```text
//! POST /api/answers {"body":"...","question_id":3,"user_id":2}
//! GET /api/answers/{question_id}
//! POST /api/answers/accept {"user_id":1,"answer_id":9}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::AcceptAnswerRequest;
use crate::domain::{AnswerId, Error, NewAnswer, QuestionId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{Envelope, created, listing};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    ErrorCode, FieldName, field_error, parse_required_id, require_id,
};

const ANSWER_REQUIRED: &str = "Body, Question ID, and User ID are required";
const ACCEPT_REQUIRED: &str = "Missing user_id or answer_id";

/// Body for `POST /api/answers`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateAnswerRequest {
    pub body: Option<String>,
    pub question_id: Option<i64>,
    pub user_id: Option<i64>,
}

impl TryFrom<CreateAnswerRequest> for NewAnswer {
    type Error = Error;

    fn try_from(value: CreateAnswerRequest) -> Result<Self, Self::Error> {
        let question_id: QuestionId = require_id(
            value.question_id,
            FieldName::new("question_id"),
            ANSWER_REQUIRED,
        )?;
        let author: UserId =
            require_id(value.user_id, FieldName::new("user_id"), ANSWER_REQUIRED)?;
        NewAnswer::try_new(question_id, author, value.body.unwrap_or_default()).map_err(|err| {
            field_error(
                ANSWER_REQUIRED,
                FieldName::new(err.field),
                ErrorCode::MissingField,
            )
        })
    }
}

/// Body for `POST /api/answers/accept`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AcceptAnswerBody {
    /// Requester; must own the question.
    pub user_id: Option<i64>,
    pub answer_id: Option<i64>,
}

impl TryFrom<AcceptAnswerBody> for AcceptAnswerRequest {
    type Error = Error;

    fn try_from(value: AcceptAnswerBody) -> Result<Self, Self::Error> {
        Ok(Self {
            requester: require_id(value.user_id, FieldName::new("user_id"), ACCEPT_REQUIRED)?,
            answer_id: require_id::<AnswerId>(
                value.answer_id,
                FieldName::new("answer_id"),
                ACCEPT_REQUIRED,
            )?,
        })
    }
}

/// Post an answer to a question.
#[utoipa::path(
    post,
    path = "/api/answers",
    request_body = CreateAnswerRequest,
    responses(
        (status = 201, description = "Answer created"),
        (status = 400, description = "Missing fields", body = ErrorSchema),
        (status = 404, description = "Question or author not found", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "createAnswer"
)]
#[post("/answers")]
pub async fn create_answer(
    state: web::Data<HttpState>,
    payload: web::Json<CreateAnswerRequest>,
) -> ApiResult<HttpResponse> {
    let answer = NewAnswer::try_from(payload.into_inner())?;
    let stored = state.answers.create_answer(answer).await?;
    Ok(created("Answer added successfully 🚀", stored))
}

/// Accept an answer on behalf of the question owner.
///
/// Switching acceptance moves the bonus from the previous answer's author
/// to the new one in a single atomic write.
#[utoipa::path(
    post,
    path = "/api/answers/accept",
    request_body = AcceptAnswerBody,
    responses(
        (status = 200, description = "Answer accepted"),
        (status = 400, description = "Missing fields or already accepted", body = ErrorSchema),
        (status = 403, description = "Requester does not own the question", body = ErrorSchema),
        (status = 404, description = "Answer not found", body = ErrorSchema),
        (status = 409, description = "Acceptance changed concurrently", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "acceptAnswer"
)]
#[post("/answers/accept")]
pub async fn accept_answer(
    state: web::Data<HttpState>,
    payload: web::Json<AcceptAnswerBody>,
) -> ApiResult<HttpResponse> {
    let request = AcceptAnswerRequest::try_from(payload.into_inner())?;
    let outcome = state.answers.accept_answer(request).await?;
    Ok(HttpResponse::Ok().json(Envelope::with_message(
        "Answer accepted, reputation adjusted (switched if needed).",
        outcome,
    )))
}

/// List the answers to a question with authors, scores and comments.
#[utoipa::path(
    get,
    path = "/api/answers/{question_id}",
    params(("question_id" = i64, Path, description = "Question identifier")),
    responses(
        (status = 200, description = "Answers, newest first"),
        (status = 400, description = "Invalid question id", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "listAnswers"
)]
#[get("/answers/{question_id}")]
pub async fn list_answers(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let question_id: QuestionId = parse_required_id(
        Some(path.as_str()),
        FieldName::new("question_id"),
        "Question ID is required",
    )?;
    let threads = state.answers_query.list_answers(question_id).await?;
    Ok(listing(threads))
}
