//! Users API handlers.
//!
//! ```text
//! POST /api/users {"username":"ada","email":"ada@example.com","password":"analytical"}
//! GET /api/users
//! GET /api/users/{user_id}/votes
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, Registration, RegistrationValidationError, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{created, listing};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_required_id};

/// Registration body for `POST /api/users`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = RegistrationValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_new(
            value.username.unwrap_or_default(),
            value.email.unwrap_or_default(),
            value.password.unwrap_or_default(),
        )
    }
}

fn map_registration_error(err: RegistrationValidationError) -> Error {
    Error::invalid_input(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": err.code(),
    }))
}

/// Register a new account with zero reputation.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered"),
        (status = 400, description = "Missing fields or short password", body = ErrorSchema),
        (status = 409, description = "Username or email taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration =
        Registration::try_from(payload.into_inner()).map_err(map_registration_error)?;
    let user = state.users.register(registration).await?;
    Ok(created("User registered successfully 🎉", user))
}

/// List registered users, oldest first.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users"),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users = state.users_query.list_users().await?;
    Ok(listing(users))
}

/// List the votes a user has cast, newest first.
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/votes",
    params(("user_id" = i64, Path, description = "Voter identifier")),
    responses(
        (status = 200, description = "Vote history"),
        (status = 400, description = "Invalid user id", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["votes"],
    operation_id = "voteHistory"
)]
#[get("/users/{user_id}/votes")]
pub async fn vote_history(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let voter: UserId = parse_required_id(
        Some(path.as_str()),
        FieldName::new("user_id"),
        "Missing params",
    )?;
    let history = state.votes_query.vote_history(voter).await?;
    Ok(listing(history))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
