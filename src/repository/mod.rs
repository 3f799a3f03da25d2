//! Remote user-record service.
//!
//! [`UserRepository`] is the seam between the session store and whatever
//! backend holds user records. Records are addressed by the user's
//! [`EncodedEmail`]. Two implementations ship with the crate: an
//! in-memory one for tests and offline use, and a REST client for a
//! Realtime-Database-style JSON store.

pub mod memory;
pub mod rtdb;

use std::future::Future;

pub use memory::{InMemoryUserRepository, RepositoryCalls};
pub use rtdb::RtdbUserRepository;

use crate::domain::{EncodedEmail, NewUser, User, UserPatch};
use crate::error::StoreError;

/// CRUD over user records keyed by encoded email.
///
/// No implementation retries. Every failure surfaces to the caller.
pub trait UserRepository: Send + Sync {
    /// Creates a record from `draft`, assigning a fresh id and empty
    /// association lists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RemoteWrite`] if the write fails.
    fn create_user(&self, draft: &NewUser) -> impl Future<Output = Result<User, StoreError>> + Send;

    /// Looks up the record stored under `key`. A missing record is
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RemoteRead`] on transport or decoding failure.
    fn fetch_user(
        &self,
        key: &EncodedEmail,
    ) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;

    /// Finds a record by its `email` field rather than by key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RemoteRead`] on transport or decoding failure.
    fn fetch_user_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;

    /// Merges `patch` onto the record under `key`, writes the merge back,
    /// and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RemoteWrite`] if the record does not exist or
    /// the read-merge-write cycle fails.
    fn update_user(
        &self,
        key: &EncodedEmail,
        patch: &UserPatch,
    ) -> impl Future<Output = Result<User, StoreError>> + Send;

    /// Deletes the record under `key`. Deleting a missing record succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RemoteWrite`] if the delete fails.
    fn delete_user(&self, key: &EncodedEmail) -> impl Future<Output = Result<(), StoreError>> + Send;
}
