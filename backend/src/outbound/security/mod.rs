//! Security adapters: password hashing.

mod bcrypt_password_hasher;

pub use bcrypt_password_hasher::{BcryptPasswordHasher, DEFAULT_COST};
