//! Shared validation for user-authored text fields.

/// A required text field was absent or blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{field} is required")]
pub struct MissingFieldError {
    /// Request field that failed validation.
    pub field: &'static str,
}

/// Trim `value` and reject it when nothing remains.
pub(crate) fn required_text(
    field: &'static str,
    value: impl Into<String>,
) -> Result<String, MissingFieldError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(MissingFieldError { field });
    }
    if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_owned())
    }
}
