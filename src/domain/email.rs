//! Email addresses encoded as remote path keys.
//!
//! The record service forbids `.` in path segments, so every `.` in an
//! email is replaced with `,`. The transform is only reversible for
//! addresses without commas. A quoted local part such as `"a,b"@c.com` is
//! a valid address, but it decodes as `"a.b"@c.com` and shares its key
//! with that address.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Replaces every `.` with `,`.
#[must_use]
pub fn encode_email(email: &str) -> String {
    email.replace('.', ",")
}

/// Replaces every `,` with `.`.
#[must_use]
pub fn decode_email(encoded: &str) -> String {
    encoded.replace(',', ".")
}

/// An email address in its encoded path-key form.
///
/// Used as the key of a user record in the remote service and in the
/// in-memory repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedEmail(String);

impl EncodedEmail {
    /// Encodes a plain email address.
    ///
    /// Encoding an already-encoded key leaves it unchanged.
    #[must_use]
    pub fn encode(email: &str) -> Self {
        Self(encode_email(email))
    }

    /// Wraps a key that is already in encoded form (e.g. a path segment).
    #[must_use]
    pub fn from_encoded(key: impl Into<String>) -> Self {
        Self(encode_email(&key.into()))
    }

    /// Returns the original email address.
    #[must_use]
    pub fn decode(&self) -> String {
        decode_email(&self.0)
    }

    /// Returns the encoded key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EncodedEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_dots_as_commas() {
        assert_eq!(encode_email("a.b@c.com"), "a,b@c,com");
        assert_eq!(EncodedEmail::encode("a.b@c.com").as_str(), "a,b@c,com");
    }

    #[test]
    fn round_trips_emails_with_dots() {
        for email in ["a.b@c.com", "first.middle.last@sub.domain.org", "x@y.z", "plain@host"] {
            assert_eq!(EncodedEmail::encode(email).decode(), email);
            assert_eq!(decode_email(&encode_email(email)), email);
        }
    }

    #[test]
    fn encoding_is_idempotent() {
        let once = EncodedEmail::encode("a.b@c.com");
        let twice = EncodedEmail::encode(once.as_str());
        assert_eq!(once, twice);
        assert_eq!(EncodedEmail::from_encoded("a,b@c,com"), once);
    }

    #[test]
    fn commas_in_quoted_local_parts_collide_with_dots() {
        let quoted = EncodedEmail::encode("\"a,b\"@c.com");
        assert_eq!(quoted.decode(), "\"a.b\"@c.com");
        assert_eq!(quoted, EncodedEmail::encode("\"a.b\"@c.com"));
    }
}
