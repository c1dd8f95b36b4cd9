//! Port for one-way password hashing.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// The adapter could not produce a hash.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Salted one-way password hashing.
///
/// Hashing is CPU-bound and synchronous; services run it on the blocking
/// thread pool.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh salt.
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError>;
}
