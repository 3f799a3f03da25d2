//! Secure on-device key-value storage and the persistence adapter.
//!
//! Provides the [`SecureStorage`] trait over string-keyed, string-valued
//! storage, two implementations ([`MemoryStorage`] and [`FileStorage`]),
//! and [`Persisted`], which keeps a reducer's state in memory and mirrors
//! it to storage after every transition.

pub mod file;
pub mod memory;
pub mod persisted;

use std::future::Future;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use persisted::{Persisted, SCHEMA_VERSION};

use crate::error::StoreError;

/// String-keyed, string-valued storage, encrypted at rest by the platform.
pub trait SecureStorage: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] on I/O failure or
    /// [`StoreError::InvalidStorageKey`] for a malformed key.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] on I/O failure or
    /// [`StoreError::InvalidStorageKey`] for a malformed key.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Deletes `key`. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] on I/O failure or
    /// [`StoreError::InvalidStorageKey`] for a malformed key.
    fn delete(&self, key: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Checks that `key` is non-empty, only contains `[A-Za-z0-9._-]`, and is
/// not made of dots alone.
///
/// # Errors
///
/// Returns [`StoreError::InvalidStorageKey`] otherwise.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        && !key.chars().all(|c| c == '.');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidStorageKey(key.to_string()))
    }
}
