//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers here mirror their serialised shape so the generated document can
//! reference them.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed, incomplete or fails validation.
    #[schema(rename = "invalid_input")]
    InvalidInput,
    /// The caller may not perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The referenced resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The answer is already the accepted one.
    #[schema(rename = "already_accepted")]
    AlreadyAccepted,
    /// A concurrent write won; the request may be retried.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "invalid_input")]
    code: ErrorCodeSchema,
    #[schema(example = "Invalid vote data provided.")]
    message: String,
    /// Correlation identifier, echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Offending field and validation code, when known.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`]. Never carries password material.
#[derive(ToSchema)]
#[schema(as = User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "ada")]
    username: String,
    #[schema(example = "ada@example.com")]
    email: String,
    #[schema(example = 25)]
    reputation: i64,
    profile_image: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}
