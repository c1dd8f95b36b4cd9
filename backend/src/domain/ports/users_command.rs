//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Hash the password and store a new account with zero reputation.
    ///
    /// Duplicate usernames or emails yield a `conflict` error. The returned
    /// user never carries the password hash.
    async fn register(&self, registration: Registration) -> Result<User, Error>;
}
