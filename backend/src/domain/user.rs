//! User accounts, registration input and author summaries.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::UserId;

/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN: usize = 6;

/// Longest accepted username, in characters.
pub const USERNAME_MAX: usize = 64;

/// Longest accepted email address, in characters.
pub const EMAIL_MAX: usize = 255;

/// Validation errors returned by [`Registration::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationValidationError {
    MissingUsername,
    MissingEmail,
    MissingPassword,
    InvalidEmail,
    UsernameTooLong { max: usize },
    EmailTooLong { max: usize },
    PasswordTooShort { min: usize },
}

impl RegistrationValidationError {
    /// Request field the error refers to.
    pub fn field(self) -> &'static str {
        match self {
            Self::MissingUsername | Self::UsernameTooLong { .. } => "username",
            Self::MissingEmail | Self::InvalidEmail | Self::EmailTooLong { .. } => "email",
            Self::MissingPassword | Self::PasswordTooShort { .. } => "password",
        }
    }

    /// Stable machine-readable code for the failure.
    pub fn code(self) -> &'static str {
        match self {
            Self::MissingUsername | Self::MissingEmail | Self::MissingPassword => "missing_field",
            Self::InvalidEmail => "invalid_email",
            Self::UsernameTooLong { .. } | Self::EmailTooLong { .. } => "too_long",
            Self::PasswordTooShort { .. } => "password_too_short",
        }
    }
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUsername | Self::MissingEmail | Self::MissingPassword => write!(
                f,
                "Missing required fields: username, email, and password are required."
            ),
            Self::InvalidEmail => write!(f, "email must look like name@domain"),
            Self::UsernameTooLong { max } => {
                write!(f, "Username must be at most {max} characters long.")
            }
            Self::EmailTooLong { max } => {
                write!(f, "Email must be at most {max} characters long.")
            }
            Self::PasswordTooShort { min } => {
                write!(f, "Password must be at least {min} characters long.")
            }
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Validated registration request.
///
/// The plaintext password lives in a [`Zeroizing`] buffer so it is wiped
/// once the registration has been hashed and dropped.
#[derive(Clone)]
pub struct Registration {
    username: String,
    email: String,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration fields.
    ///
    /// # Examples
    /// ```
    /// use forum_backend::domain::{Registration, RegistrationValidationError};
    ///
    /// let err = Registration::try_new("ada", "ada@example.com", "12345")
    ///     .err()
    ///     .expect("short password");
    /// assert_eq!(err, RegistrationValidationError::PasswordTooShort { min: 6 });
    /// ```
    pub fn try_new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, RegistrationValidationError> {
        let username = username.into().trim().to_owned();
        let email = email.into().trim().to_owned();
        let password = Zeroizing::new(password.into());

        if username.is_empty() {
            return Err(RegistrationValidationError::MissingUsername);
        }
        if email.is_empty() {
            return Err(RegistrationValidationError::MissingEmail);
        }
        if password.is_empty() {
            return Err(RegistrationValidationError::MissingPassword);
        }
        if username.chars().count() > USERNAME_MAX {
            return Err(RegistrationValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if email.chars().count() > EMAIL_MAX {
            return Err(RegistrationValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !is_plausible_email(&email) {
            return Err(RegistrationValidationError::InvalidEmail);
        }
        if password.chars().count() < PASSWORD_MIN {
            return Err(RegistrationValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }

        Ok(Self {
            username,
            email,
            password,
        })
    }

    /// Trimmed username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Trimmed email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Plaintext password, for hashing only.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        _ => false,
    }
}

/// Encoded password hash as produced by a [`crate::domain::ports::PasswordHasher`].
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash string.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded representation stored by persistence adapters.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Insert payload for a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: PasswordHash,
}

/// Registered forum user.
///
/// `reputation` is only ever changed by vote reconciliation and answer
/// acceptance; nothing else writes it. The password hash never leaves the
/// persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub reputation: i64,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Public author details embedded in question, answer and comment listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub id: UserId,
    pub username: String,
    pub reputation: i64,
    pub profile_image: Option<String>,
}

impl From<&User> for AuthorSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            reputation: user.reputation,
            profile_image: user.profile_image.clone(),
        }
    }
}
