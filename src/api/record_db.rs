//! In-memory JSON record collection served by the emulator.
//!
//! [`RecordDb`] holds one collection of JSON objects keyed by path segment
//! and mimics the Realtime Database write semantics the client relies on:
//! `PUT` replaces a record, `PATCH` merges its top-level children (a `null`
//! child deletes that child), a record left without children disappears,
//! and `DELETE` of an absent record succeeds.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::error::StoreError;

/// Concurrent map of record key to JSON object.
#[derive(Debug, Default)]
pub struct RecordDb {
    records: RwLock<BTreeMap<String, Map<String, Value>>>,
}

impl RecordDb {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record stored under `key`.
    pub async fn get(&self, key: &str) -> Option<Map<String, Value>> {
        self.records.read().await.get(key).cloned()
    }

    /// Returns every record, ordered by key.
    pub async fn all(&self) -> BTreeMap<String, Map<String, Value>> {
        self.records.read().await.clone()
    }

    /// Returns the records whose `child` equals `value`, ordered by key.
    pub async fn query(&self, child: &str, value: &Value) -> BTreeMap<String, Map<String, Value>> {
        self.records
            .read()
            .await
            .iter()
            .filter(|(_, record)| record.get(child) == Some(value))
            .map(|(key, record)| (key.clone(), record.clone()))
            .collect()
    }

    /// Replaces the record under `key` with `body`. An empty object
    /// removes the record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRequest`] if `body` is not a JSON object.
    pub async fn put(&self, key: &str, body: Value) -> Result<Map<String, Value>, StoreError> {
        let record = into_object(body)?;
        let mut records = self.records.write().await;
        if record.is_empty() {
            records.remove(key);
        } else {
            records.insert(key.to_string(), record.clone());
        }
        tracing::debug!(key, "record replaced");
        Ok(record)
    }

    /// Merges the top-level children of `body` into the record under `key`,
    /// creating it when absent. A `null` child removes that child.
    ///
    /// Returns the merged record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRequest`] if `body` is not a JSON object.
    pub async fn patch(&self, key: &str, body: Value) -> Result<Map<String, Value>, StoreError> {
        let children = into_object(body)?;
        let mut records = self.records.write().await;
        let record = records.entry(key.to_string()).or_default();
        for (child, value) in children {
            if value.is_null() {
                record.remove(&child);
            } else {
                record.insert(child, value);
            }
        }
        let merged = record.clone();
        if record.is_empty() {
            records.remove(key);
        }
        tracing::debug!(key, "record patched");
        Ok(merged)
    }

    /// Removes the record under `key`. Returns `true` if it existed.
    pub async fn delete(&self, key: &str) -> bool {
        let removed = self.records.write().await.remove(key).is_some();
        tracing::debug!(key, removed, "record deleted");
        removed
    }

    /// Returns the number of records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns `true` if the collection is empty.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn into_object(body: Value) -> Result<Map<String, Value>, StoreError> {
    match body {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidRequest(format!(
            "body must be a JSON object, got {}",
            kind(&other)
        ))),
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
