//! In-memory user repository with call recording.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;

use super::UserRepository;
use crate::domain::{EncodedEmail, NewUser, User, UserId, UserPatch};
use crate::error::StoreError;

/// Number of calls made to each repository operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepositoryCalls {
    /// `create_user` calls.
    pub create: usize,
    /// `fetch_user` and `fetch_user_by_email` calls.
    pub fetch: usize,
    /// `update_user` calls.
    pub update: usize,
    /// `delete_user` calls.
    pub delete: usize,
}

impl RepositoryCalls {
    /// Total calls across all operations.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.create + self.fetch + self.update + self.delete
    }
}

#[derive(Debug, Default)]
struct Counters {
    create: AtomicUsize,
    fetch: AtomicUsize,
    update: AtomicUsize,
    delete: AtomicUsize,
}

/// User repository backed by a shared in-memory map.
///
/// Clones share records, counters, and failure switches, so a test can
/// hand one clone to a store and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<EncodedEmail, User>>>,
    counters: Arc<Counters>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many times each operation has been called.
    #[must_use]
    pub fn calls(&self) -> RepositoryCalls {
        RepositoryCalls {
            create: self.counters.create.load(Ordering::SeqCst),
            fetch: self.counters.fetch.load(Ordering::SeqCst),
            update: self.counters.update.load(Ordering::SeqCst),
            delete: self.counters.delete.load(Ordering::SeqCst),
        }
    }

    /// Makes reads fail with [`StoreError::RemoteRead`].
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes writes fail with [`StoreError::RemoteWrite`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Stores `user` directly under its encoded email.
    pub async fn seed(&self, user: User) {
        self.users.write().await.insert(user.key(), user);
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns `true` if no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::RemoteRead("injected read failure".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::RemoteWrite("injected write failure".to_string()));
        }
        Ok(())
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, draft: &NewUser) -> Result<User, StoreError> {
        self.counters.create.fetch_add(1, Ordering::SeqCst);
        self.check_write()?;

        let user = User::from_draft(draft.clone(), UserId::generate(), Utc::now());
        self.users.write().await.insert(user.key(), user.clone());
        Ok(user)
    }

    async fn fetch_user(&self, key: &EncodedEmail) -> Result<Option<User>, StoreError> {
        self.counters.fetch.fetch_add(1, Ordering::SeqCst);
        self.check_read()?;
        Ok(self.users.read().await.get(key).cloned())
    }

    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.counters.fetch.fetch_add(1, Ordering::SeqCst);
        self.check_read()?;
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn update_user(&self, key: &EncodedEmail, patch: &UserPatch) -> Result<User, StoreError> {
        self.counters.update.fetch_add(1, Ordering::SeqCst);
        self.check_write()?;

        let mut users = self.users.write().await;
        let user = users
            .get_mut(key)
            .ok_or_else(|| StoreError::RemoteWrite(format!("user {} not found", key.decode())))?;
        user.apply(patch, Utc::now());
        Ok(user.clone())
    }

    async fn delete_user(&self, key: &EncodedEmail) -> Result<(), StoreError> {
        self.counters.delete.fetch_add(1, Ordering::SeqCst);
        self.check_write()?;
        self.users.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[tokio::test]
    async fn create_assigns_id_and_empty_lists() {
        let repo = InMemoryUserRepository::new();
        let Ok(user) = repo.create_user(&NewUser::new("a@b.com", Role::User)).await else {
            panic!("create failed");
        };
        assert!(!user.id.as_str().is_empty());
        assert_eq!(user.bookmarked_events_count, 0);
        assert_eq!(user.tickets_purchased_count, 0);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn fetch_missing_is_none() {
        let repo = InMemoryUserRepository::new();
        let result = repo.fetch_user(&EncodedEmail::encode("x@y.z")).await;
        assert!(matches!(result, Ok(None)));
        assert_eq!(repo.calls().fetch, 1);
    }

    #[tokio::test]
    async fn fetch_by_email_scans_records() {
        let repo = InMemoryUserRepository::new();
        let _ = repo.create_user(&NewUser::new("a.b@c.com", Role::Organizer)).await;
        let Ok(Some(user)) = repo.fetch_user_by_email("a.b@c.com").await else {
            panic!("user not found");
        };
        assert_eq!(user.role, Role::Organizer);
    }

    #[tokio::test]
    async fn update_missing_record_is_write_error() {
        let repo = InMemoryUserRepository::new();
        let result = repo
            .update_user(&EncodedEmail::encode("x@y.z"), &UserPatch::default())
            .await;
        assert!(matches!(result, Err(StoreError::RemoteWrite(_))));
    }

    #[tokio::test]
    async fn injected_failures_surface() {
        let repo = InMemoryUserRepository::new();
        repo.set_fail_reads(true);
        repo.set_fail_writes(true);
        let key = EncodedEmail::encode("a@b.com");
        assert!(matches!(repo.fetch_user(&key).await, Err(StoreError::RemoteRead(_))));
        assert!(matches!(
            repo.create_user(&NewUser::new("a@b.com", Role::User)).await,
            Err(StoreError::RemoteWrite(_))
        ));
        assert!(matches!(repo.delete_user(&key).await, Err(StoreError::RemoteWrite(_))));
        assert_eq!(repo.calls().total(), 3);
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let repo = InMemoryUserRepository::new();
        let _ = repo.create_user(&NewUser::new("a@b.com", Role::User)).await;
        let key = EncodedEmail::encode("a@b.com");
        assert!(repo.delete_user(&key).await.is_ok());
        assert!(repo.is_empty().await);
        assert!(repo.delete_user(&key).await.is_ok());
    }
}
