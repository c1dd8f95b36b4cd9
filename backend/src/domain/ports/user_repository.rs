//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Username or email is already registered.
        Duplicate { message: String } => "user already exists: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account with zero reputation.
    ///
    /// Fails with [`UserPersistenceError::Duplicate`] when the username or
    /// email is taken.
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch every account, oldest first.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;
}

/// Fixture repository that stores nothing and lists no users.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn create(&self, _user: &NewUser) -> Result<User, UserPersistenceError> {
        Err(UserPersistenceError::connection(
            "fixture repository does not persist users",
        ))
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(Vec::new())
    }
}
