//! Votes API handlers.
//!
//! ```text
//! POST /api/votes {"user_id":2,"answer_id":4,"vote_type":1}
//! GET /api/votes/status?user_id=2&answer_id=4
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::domain::ports::CastVoteRequest;
use crate::domain::{Error, UserId, VoteAction, VoteDirection, VoteOutcome};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    ErrorCode, FieldName, field_error, parse_optional_id, parse_required_id, require_id,
    require_target,
};

const INVALID_VOTE: &str = "Invalid vote data provided.";
const MISSING_PARAMS: &str = "Missing params";

/// Body for `POST /api/votes`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CastVoteBody {
    pub user_id: Option<i64>,
    pub question_id: Option<i64>,
    pub answer_id: Option<i64>,
    /// `1` for an upvote, `-1` for a downvote.
    pub vote_type: Option<i64>,
}

impl TryFrom<CastVoteBody> for CastVoteRequest {
    type Error = Error;

    fn try_from(value: CastVoteBody) -> Result<Self, Self::Error> {
        let voter: UserId = require_id(value.user_id, FieldName::new("user_id"), INVALID_VOTE)?;
        let target = require_target(value.question_id, value.answer_id, INVALID_VOTE)?;
        let raw = value.vote_type.ok_or_else(|| {
            field_error(
                INVALID_VOTE,
                FieldName::new("vote_type"),
                ErrorCode::MissingField,
            )
        })?;
        let direction = VoteDirection::try_from(raw).map_err(|_| {
            field_error(
                INVALID_VOTE,
                FieldName::new("vote_type"),
                ErrorCode::InvalidVoteType,
            )
        })?;
        Ok(Self {
            voter,
            target,
            direction,
        })
    }
}

/// Response for `POST /api/votes`.
#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub success: bool,
    pub action: VoteAction,
    pub message: String,
    pub data: VoteOutcome,
}

impl From<VoteOutcome> for VoteResponse {
    fn from(outcome: VoteOutcome) -> Self {
        let message = match outcome.action {
            VoteAction::NewVote => {
                let label = match outcome.direction {
                    VoteDirection::Up => "Upvote",
                    VoteDirection::Down => "Downvote",
                };
                format!("New {label} recorded. Reputation updated.")
            }
            VoteAction::Unvote => format!(
                "Vote on {} removed. Reputation adjusted.",
                outcome.target.kind().as_str()
            ),
            VoteAction::Flip => format!(
                "Vote on {} flipped. Reputation adjusted.",
                outcome.target.kind().as_str()
            ),
        };
        Self {
            success: true,
            action: outcome.action,
            message,
            data: outcome,
        }
    }
}

/// Cast, remove or flip a vote.
///
/// Repeating the current direction removes the vote; the opposite direction
/// flips it. The post owner's reputation moves by the matching delta in the
/// same write.
#[utoipa::path(
    post,
    path = "/api/votes",
    request_body = CastVoteBody,
    responses(
        (status = 201, description = "New vote recorded"),
        (status = 200, description = "Vote removed or flipped"),
        (status = 400, description = "Invalid vote data", body = ErrorSchema),
        (status = 403, description = "Self-vote", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema),
        (status = 409, description = "Concurrent vote change", body = ErrorSchema)
    ),
    tags = ["votes"],
    operation_id = "castVote"
)]
#[post("/votes")]
pub async fn cast_vote(
    state: web::Data<HttpState>,
    payload: web::Json<CastVoteBody>,
) -> ApiResult<HttpResponse> {
    let request = CastVoteRequest::try_from(payload.into_inner())?;
    let outcome = state.votes.cast_vote(request).await?;
    let mut response = match outcome.action {
        VoteAction::NewVote => HttpResponse::Created(),
        VoteAction::Unvote | VoteAction::Flip => HttpResponse::Ok(),
    };
    Ok(response.json(VoteResponse::from(outcome)))
}

/// Query for `GET /api/votes/status`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VoteStatusParams {
    pub user_id: Option<String>,
    pub question_id: Option<String>,
    pub answer_id: Option<String>,
}

/// Response for `GET /api/votes/status`.
#[derive(Debug, Serialize)]
pub struct VoteStatusResponse {
    pub success: bool,
    /// `1`, `-1`, or `null` when the user has not voted.
    pub vote_type: Option<VoteDirection>,
}

/// The user's current vote on a question or answer.
#[utoipa::path(
    get,
    path = "/api/votes/status",
    params(VoteStatusParams),
    responses(
        (status = 200, description = "Current vote direction or null"),
        (status = 400, description = "Missing params", body = ErrorSchema)
    ),
    tags = ["votes"],
    operation_id = "voteStatus"
)]
#[get("/votes/status")]
pub async fn vote_status(
    state: web::Data<HttpState>,
    query: web::Query<VoteStatusParams>,
) -> ApiResult<HttpResponse> {
    let voter: UserId = parse_required_id(
        query.user_id.as_deref(),
        FieldName::new("user_id"),
        MISSING_PARAMS,
    )?;
    let question_id = parse_optional_id(
        query.question_id.as_deref(),
        FieldName::new("question_id"),
        MISSING_PARAMS,
    )?;
    let answer_id = parse_optional_id(
        query.answer_id.as_deref(),
        FieldName::new("answer_id"),
        MISSING_PARAMS,
    )?;
    let target = require_target(question_id, answer_id, MISSING_PARAMS)?;
    let direction = state.votes_query.vote_status(voter, target).await?;
    Ok(HttpResponse::Ok().json(VoteStatusResponse {
        success: true,
        vote_type: direction,
    }))
}
