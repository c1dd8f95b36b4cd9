//! User registration and listing services.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    PasswordHasher, UserPersistenceError, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{Error, NewUser, PasswordHash, Registration, User};

/// User service implementing [`UsersCommand`] and [`UsersQuery`].
#[derive(Clone)]
pub struct UserService<R, H> {
    repo: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> UserService<R, H> {
    /// Create a new service with the given repository and password hasher.
    pub fn new(repo: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repo, hasher }
    }
}

/// Hash the registration's password on the blocking thread pool.
///
/// The registration, and with it the plaintext buffer, is dropped on the
/// blocking thread once hashing finishes.
async fn hash_password<H>(hasher: Arc<H>, registration: Registration) -> Result<PasswordHash, Error>
where
    H: PasswordHasher + 'static,
{
    tokio::task::spawn_blocking(move || hasher.hash(registration.password()))
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
        .map_err(|err| Error::internal(err.to_string()))
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::Duplicate { .. } => {
            Error::conflict("Username or Email already exists!")
        }
    }
}

#[async_trait]
impl<R, H> UsersCommand for UserService<R, H>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let username = registration.username().to_owned();
        let email = registration.email().to_owned();
        let password_hash = hash_password(Arc::clone(&self.hasher), registration).await?;
        let new_user = NewUser {
            username,
            email,
            password_hash,
        };

        let user = self
            .repo
            .create(&new_user)
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }
}

#[async_trait]
impl<R, H> UsersQuery for UserService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repo.list().await.map_err(map_user_persistence_error)
    }
}
