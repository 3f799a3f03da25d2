//! In-memory secure storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::{SecureStorage, validate_key};
use crate::error::StoreError;

/// Shared in-memory storage.
///
/// Clones share the same map, so a test can keep a handle and inspect
/// what a store wrote. [`MemoryStorage::set_failing`] makes every
/// operation fail, for exercising the swallow-and-log path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent operation fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map(|map| map.len()).unwrap_or(0)
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Storage("storage unavailable".to_string()));
        }
        Ok(())
    }

    fn poisoned() -> StoreError {
        StoreError::Storage("storage lock poisoned".to_string())
    }
}

impl SecureStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check(key)?;
        let map = self.entries.lock().map_err(|_| Self::poisoned())?;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check(key)?;
        let mut map = self.entries.lock().map_err(|_| Self::poisoned())?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.check(key)?;
        let mut map = self.entries.lock().map_err(|_| Self::poisoned())?;
        map.remove(key);
        Ok(())
    }
}
