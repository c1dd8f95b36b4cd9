//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies carry optional raw fields; these helpers turn absent or
//! malformed values into `invalid_input` errors that keep the endpoint's
//! client-facing message and record the offending field in `details`.

use serde_json::json;

use crate::domain::{Error, IdValidationError, PostRef, PostRefError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidId,
    InvalidVoteType,
    InvalidTarget,
    TooLong,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidVoteType => "invalid_vote_type",
            ErrorCode::InvalidTarget => "invalid_target",
            ErrorCode::TooLong => "too_long",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

/// Build an `invalid_input` error naming the field and failure code.
pub(crate) fn field_error(message: &str, field: FieldName, code: ErrorCode) -> Error {
    Error::invalid_input(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

/// Require a positive identifier from a JSON body field.
pub(crate) fn require_id<T>(value: Option<i64>, field: FieldName, message: &str) -> Result<T, Error>
where
    T: TryFrom<i64, Error = IdValidationError>,
{
    let raw = value.ok_or_else(|| field_error(message, field, ErrorCode::MissingField))?;
    T::try_from(raw).map_err(|_| field_error(message, field, ErrorCode::InvalidId))
}

/// Parse an optional identifier from a query or path string.
///
/// Blank strings count as absent.
pub(crate) fn parse_optional_id(
    value: Option<&str>,
    field: FieldName,
    message: &str,
) -> Result<Option<i64>, Error> {
    match value.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| field_error(message, field, ErrorCode::InvalidId)),
    }
}

/// Parse a required identifier from a query or path string.
pub(crate) fn parse_required_id<T>(
    value: Option<&str>,
    field: FieldName,
    message: &str,
) -> Result<T, Error>
where
    T: TryFrom<i64, Error = IdValidationError>,
{
    let raw = parse_optional_id(value, field, message)?;
    require_id(raw, field, message)
}

/// Resolve a `(question_id, answer_id)` pair into exactly one target.
pub(crate) fn require_target(
    question_id: Option<i64>,
    answer_id: Option<i64>,
    message: &str,
) -> Result<PostRef, Error> {
    PostRef::from_parts(question_id, answer_id).map_err(|err| {
        let code = match err {
            PostRefError::InvalidId(_) => ErrorCode::InvalidId,
            PostRefError::Missing | PostRefError::Ambiguous => ErrorCode::InvalidTarget,
        };
        Error::invalid_input(message).with_details(json!({
            "field": "question_id|answer_id",
            "code": code.as_str(),
        }))
    })
}
