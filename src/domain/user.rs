//! User records, creation drafts, and partial updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EncodedEmail, Event, UserId};

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform administrator.
    Admin,
    /// Regular attendee.
    #[default]
    User,
    /// Publishes and manages events.
    Organizer,
}

/// Draft of a new user, sent to the remote service on sign-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Email address, the stable external key of the record.
    pub email: String,
    /// Account role.
    pub role: Role,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Interest tags picked during onboarding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest: Option<Vec<String>>,
}

impl NewUser {
    /// Creates a draft with only the required fields.
    #[must_use]
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
            name: None,
            phone_number: None,
            interest: None,
        }
    }
}

/// A user record as stored remotely and cached by the session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identifier assigned at creation.
    pub id: UserId,
    /// Email address, the stable external key of the record.
    pub email: String,
    /// Account role.
    pub role: Role,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Interest tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest: Option<Vec<String>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Event snapshots bookmarked on the account.
    #[serde(default)]
    pub bookmarked_events: Vec<Event>,
    /// Recently viewed event ids, most recent first.
    #[serde(default)]
    pub recently_viewed: Vec<String>,
    /// Event snapshots of purchased tickets.
    #[serde(default)]
    pub tickets_purchased: Vec<Event>,
    /// Length of `bookmarked_events`.
    #[serde(default)]
    pub bookmarked_events_count: usize,
    /// Length of `recently_viewed`.
    #[serde(default)]
    pub recently_viewed_count: usize,
    /// Length of `tickets_purchased`.
    #[serde(default)]
    pub tickets_purchased_count: usize,
}

impl User {
    /// Builds a fresh record from a draft with empty association lists.
    #[must_use]
    pub fn from_draft(draft: NewUser, id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            email: draft.email,
            role: draft.role,
            name: draft.name,
            phone_number: draft.phone_number,
            interest: draft.interest,
            created_at: now,
            updated_at: now,
            bookmarked_events: Vec::new(),
            recently_viewed: Vec::new(),
            tickets_purchased: Vec::new(),
            bookmarked_events_count: 0,
            recently_viewed_count: 0,
            tickets_purchased_count: 0,
        }
    }

    /// Returns the remote key of this record.
    #[must_use]
    pub fn key(&self) -> EncodedEmail {
        EncodedEmail::encode(&self.email)
    }

    /// Merges a partial update onto this record.
    ///
    /// `id`, `email` and `created_at` are never touched. `updated_at` is set
    /// to `now` and the association counts are re-derived from the lists.
    pub fn apply(&mut self, patch: &UserPatch, now: DateTime<Utc>) {
        if let Some(name) = &patch.name {
            self.name = Some(name.clone());
        }
        if let Some(phone) = &patch.phone_number {
            self.phone_number = Some(phone.clone());
        }
        if let Some(interest) = &patch.interest {
            self.interest = Some(interest.clone());
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(events) = &patch.bookmarked_events {
            self.bookmarked_events = events.clone();
        }
        if let Some(ids) = &patch.recently_viewed {
            self.recently_viewed = ids.clone();
        }
        if let Some(tickets) = &patch.tickets_purchased {
            self.tickets_purchased = tickets.clone();
        }
        self.updated_at = now;
        self.sync_counts();
    }

    /// Re-derives the three association counts from their lists.
    pub fn sync_counts(&mut self) {
        self.bookmarked_events_count = self.bookmarked_events.len();
        self.recently_viewed_count = self.recently_viewed.len();
        self.tickets_purchased_count = self.tickets_purchased.len();
    }
}

/// Partial update of a [`User`]. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// New interest tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest: Option<Vec<String>>,
    /// New role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Replacement bookmark list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmarked_events: Option<Vec<Event>>,
    /// Replacement recently-viewed list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recently_viewed: Option<Vec<String>>,
    /// Replacement purchased-ticket list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tickets_purchased: Option<Vec<Event>>,
}


#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Duration;

    use super::fixtures::user;
    use super::*;
    use crate::domain::event::fixtures::event;

    #[test]
    fn from_draft_starts_with_empty_associations() {
        let u = user("a@b.com");
        assert_eq!(u.bookmarked_events_count, 0);
        assert_eq!(u.tickets_purchased_count, 0);
        assert_eq!(u.recently_viewed_count, 0);
        assert!(u.tickets_purchased.is_empty());
        assert_eq!(u.created_at, u.updated_at);
    }

    #[test]
    fn apply_merges_and_keeps_identity() {
        let mut u = user("a.b@c.com");
        let id = u.id.clone();
        let later = u.created_at + Duration::minutes(5);
        let patch = UserPatch {
            name: Some("Ada".to_string()),
            tickets_purchased: Some(vec![event("e1"), event("e2")]),
            ..UserPatch::default()
        };

        u.apply(&patch, later);

        assert_eq!(u.id, id);
        assert_eq!(u.email, "a.b@c.com");
        assert_eq!(u.name.as_deref(), Some("Ada"));
        assert_eq!(u.tickets_purchased_count, 2);
        assert_eq!(u.updated_at, later);
        assert_ne!(u.created_at, u.updated_at);
    }

    #[test]
    fn record_uses_camel_case_wire_names() {
        let u = user("a@b.com");
        let Ok(value) = serde_json::to_value(&u) else {
            panic!("serialization failed");
        };
        assert_eq!(value["bookmarkedEventsCount"], 0);
        assert_eq!(value["ticketsPurchasedCount"], 0);
        assert_eq!(value["role"], "user");
        assert!(value.get("name").is_none());
    }

    #[test]
    fn key_encodes_email() {
        assert_eq!(user("a.b@c.com").key().as_str(), "a,b@c,com");
    }
}
