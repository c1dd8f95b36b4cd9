//! Comments API handlers.
//!
//! A comment belongs to exactly one question or answer.
//!
//! ```text
//! POST /api/comments {"body":"...","user_id":1,"answer_id":4}
//! GET /api/comments?question_id=3
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::domain::{AnswerId, Error, NewComment, PostRef, QuestionId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{created, listing};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    ErrorCode, FieldName, field_error, parse_optional_id, require_id, require_target,
};

const COMMENT_REQUIRED: &str = "Body and User ID are required";
const TARGET_REQUIRED: &str = "Comment must belong to either a Question OR an Answer";
const LIST_TARGET_REQUIRED: &str = "Please provide either question_id or answer_id in query params";

/// Body for `POST /api/comments`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateCommentRequest {
    pub body: Option<String>,
    pub user_id: Option<i64>,
    pub question_id: Option<i64>,
    pub answer_id: Option<i64>,
}

impl TryFrom<CreateCommentRequest> for NewComment {
    type Error = Error;

    fn try_from(value: CreateCommentRequest) -> Result<Self, Self::Error> {
        let author: UserId =
            require_id(value.user_id, FieldName::new("user_id"), COMMENT_REQUIRED)?;
        let body = value.body.unwrap_or_default();
        if body.trim().is_empty() {
            return Err(field_error(
                COMMENT_REQUIRED,
                FieldName::new("body"),
                ErrorCode::MissingField,
            ));
        }
        let target = require_target(value.question_id, value.answer_id, TARGET_REQUIRED)?;
        NewComment::try_new(body, author, target).map_err(|err| {
            field_error(
                COMMENT_REQUIRED,
                FieldName::new(err.field),
                ErrorCode::MissingField,
            )
        })
    }
}

/// Query for `GET /api/comments`. Blank values count as absent.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CommentsQueryParams {
    pub question_id: Option<String>,
    pub answer_id: Option<String>,
}

impl CommentsQueryParams {
    /// The question takes precedence when both identifiers are supplied.
    fn target(&self) -> Result<PostRef, Error> {
        let question_id = parse_optional_id(
            self.question_id.as_deref(),
            FieldName::new("question_id"),
            LIST_TARGET_REQUIRED,
        )?;
        if let Some(raw) = question_id {
            let id: QuestionId =
                require_id(Some(raw), FieldName::new("question_id"), LIST_TARGET_REQUIRED)?;
            return Ok(PostRef::Question(id));
        }
        let answer_id = parse_optional_id(
            self.answer_id.as_deref(),
            FieldName::new("answer_id"),
            LIST_TARGET_REQUIRED,
        )?;
        match answer_id {
            Some(raw) => {
                let id: AnswerId =
                    require_id(Some(raw), FieldName::new("answer_id"), LIST_TARGET_REQUIRED)?;
                Ok(PostRef::Answer(id))
            }
            None => require_target(None, None, LIST_TARGET_REQUIRED),
        }
    }
}

/// Comment on a question or an answer.
#[utoipa::path(
    post,
    path = "/api/comments",
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created"),
        (status = 400, description = "Missing fields or ambiguous target", body = ErrorSchema),
        (status = 404, description = "Target or author not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "createComment"
)]
#[post("/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    payload: web::Json<CreateCommentRequest>,
) -> ApiResult<HttpResponse> {
    let comment = NewComment::try_from(payload.into_inner())?;
    let stored = state.comments.create_comment(comment).await?;
    Ok(created("Comment added successfully 💬", stored))
}

/// List the comments on a question or an answer, oldest first.
#[utoipa::path(
    get,
    path = "/api/comments",
    params(CommentsQueryParams),
    responses(
        (status = 200, description = "Comments with their authors"),
        (status = 400, description = "No target supplied", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "listComments"
)]
#[get("/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    query: web::Query<CommentsQueryParams>,
) -> ApiResult<HttpResponse> {
    let target = query.target()?;
    let comments = state.comments_query.list_comments(target).await?;
    Ok(listing(comments))
}
