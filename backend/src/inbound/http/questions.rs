//! Questions API handlers.
//!
//! ```text
//! POST /api/questions {"title":"...","body":"...","user_id":1}
//! GET /api/questions
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, NewQuestion, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{created, listing};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ErrorCode, FieldName, field_error, require_id};

const REQUIRED: &str = "Title, Body, and User ID are required";

/// Body for `POST /api/questions`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateQuestionRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub user_id: Option<i64>,
}

impl TryFrom<CreateQuestionRequest> for NewQuestion {
    type Error = Error;

    fn try_from(value: CreateQuestionRequest) -> Result<Self, Self::Error> {
        let author: UserId = require_id(value.user_id, FieldName::new("user_id"), REQUIRED)?;
        NewQuestion::try_new(
            value.title.unwrap_or_default(),
            value.body.unwrap_or_default(),
            author,
        )
        .map_err(|err| field_error(REQUIRED, FieldName::new(err.field), ErrorCode::MissingField))
    }
}

/// Post a question.
#[utoipa::path(
    post,
    path = "/api/questions",
    request_body = CreateQuestionRequest,
    responses(
        (status = 201, description = "Question created"),
        (status = 400, description = "Missing fields", body = ErrorSchema),
        (status = 404, description = "Author not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "createQuestion"
)]
#[post("/questions")]
pub async fn create_question(
    state: web::Data<HttpState>,
    payload: web::Json<CreateQuestionRequest>,
) -> ApiResult<HttpResponse> {
    let question = NewQuestion::try_from(payload.into_inner())?;
    let stored = state.questions.create_question(question).await?;
    Ok(created("Question posted successfully 🚀", stored))
}

/// List questions, newest first, with author and score.
#[utoipa::path(
    get,
    path = "/api/questions",
    responses(
        (status = 200, description = "Questions"),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "listQuestions"
)]
#[get("/questions")]
pub async fn list_questions(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let questions = state.questions_query.list_questions().await?;
    Ok(listing(questions))
}
