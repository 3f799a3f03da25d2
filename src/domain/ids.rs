//! Type-safe user and session identifiers.
//!
//! Both identifiers are string newtypes with a fixed prefix followed by a
//! UUID v4, so a user id can never be passed where a session id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier of a user record.
///
/// Assigned once when the record is created and never changed afterwards.
/// The user's email, not this id, addresses the record remotely.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Generates a fresh `user-<uuid>` identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("user-{}", uuid::Uuid::new_v4().simple()))
    }

    /// Wraps an existing identifier string.
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one login session.
///
/// A fresh value is generated on every login.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generates a fresh `session_<uuid>` identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("session_{}", uuid::Uuid::new_v4().simple()))
    }

    /// Wraps an existing identifier string (e.g. one issued by the
    /// authentication provider).
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn generate_produces_unique_prefixed_ids() {
        let a = UserId::generate();
        let b = UserId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("user-"));
        assert!(a.as_str().len() > "user-".len());
    }

    #[test]
    fn session_ids_are_prefixed() {
        let id = SessionId::generate();
        assert!(id.to_string().starts_with("session_"));
        assert_ne!(id, SessionId::generate());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = UserId::from_string("user-1");
        let Ok(json) = serde_json::to_string(&id) else {
            panic!("serialization failed");
        };
        assert_eq!(json, "\"user-1\"");
    }
}
