//! In-process store implementing every repository port.
//!
//! The whole store sits behind one mutex, so each port call observes and
//! mutates a consistent snapshot. Conditional writes (`apply`,
//! `apply_acceptance`) re-check the state they were decided against while
//! holding the lock and refuse with a conflict on mismatch, matching the
//! guarantees of the PostgreSQL adapters.
//!
//! Used when no database URL is configured and as the store behind the
//! HTTP integration tests.
//!
//! Password hashes are accepted on registration but not retained, since no
//! operation reads them back.

mod repositories;
mod state;

use std::sync::{Mutex, MutexGuard};

use self::state::State;

/// Failure inside the in-memory store, mapped onto each port's error type.
#[derive(Debug, Clone, PartialEq, Eq)]
enum StoreError {
    Poisoned,
    MissingReference(String),
    Duplicate(String),
    Conflict(String),
    Corrupt(String),
}

/// Mutex-guarded in-memory forum store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state.lock().map_err(|_| StoreError::Poisoned)
    }

    fn with_state<T>(
        &self,
        op: impl FnOnce(&mut State) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.lock()?;
        op(&mut guard)
    }
}

#[cfg(test)]
mod tests;
