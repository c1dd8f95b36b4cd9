//! bcrypt implementation of the `PasswordHasher` port.
//!
//! Encoded hashes use the modular crypt format (`$2b$<cost>$...`), so the
//! cost can be raised without invalidating stored hashes.

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Cost used by [`BcryptPasswordHasher::default`].
pub const DEFAULT_COST: u32 = 10;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// Salted bcrypt password hasher.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the given cost, clamped to bcrypt's `4..=31`.
    #[must_use]
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }

    /// Work factor applied to new hashes.
    #[must_use]
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        bcrypt::hash(password, self.cost)
            .map(PasswordHash::new)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> BcryptPasswordHasher {
        BcryptPasswordHasher::new(MIN_COST)
    }

    #[rstest]
    fn hash_verifies_against_the_original_password(hasher: BcryptPasswordHasher) {
        let hash = hasher.hash("correct horse").expect("hash");
        assert!(bcrypt::verify("correct horse", hash.as_str()).expect("well-formed"));
        assert!(!bcrypt::verify("wrong horse", hash.as_str()).expect("well-formed"));
    }

    #[rstest]
    fn salts_each_hash(hasher: BcryptPasswordHasher) {
        let first = hasher.hash("secret").expect("hash");
        let second = hasher.hash("secret").expect("hash");
        assert_ne!(first, second);
        assert!(!first.as_str().contains("secret"));
        assert!(first.as_str().starts_with("$2b$04$"));
    }

    #[rstest]
    #[case(0, MIN_COST)]
    #[case(DEFAULT_COST, 10)]
    #[case(99, MAX_COST)]
    fn cost_is_clamped_to_the_supported_range(#[case] requested: u32, #[case] expected: u32) {
        assert_eq!(BcryptPasswordHasher::new(requested).cost(), expected);
    }

    #[rstest]
    fn default_cost_is_ten() {
        assert_eq!(BcryptPasswordHasher::default().cost(), 10);
    }
}
