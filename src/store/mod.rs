//! Client-side stores consumed by the UI.
//!
//! [`SessionStore`] and [`BookmarkStore`] share no mutable state. Each is
//! an explicitly constructed instance; [`Stores`] bundles one of each for
//! the lifetime of the process.

pub mod bookmarks;
pub mod session;

pub use bookmarks::{BookmarkStore, DEFAULT_RECENT_LIMIT};
pub use session::SessionStore;

use crate::config::AppConfig;
use crate::repository::{RtdbUserRepository, UserRepository};
use crate::storage::{FileStorage, SecureStorage};

/// One session store and one bookmark store.
#[derive(Debug)]
pub struct Stores<R, S> {
    /// Login state.
    pub session: SessionStore<R, S>,
    /// Saved and recently viewed events.
    pub bookmarks: BookmarkStore<S>,
}

impl<R, S> Stores<R, S>
where
    R: UserRepository,
    S: SecureStorage + Clone,
{
    /// Builds both stores over the given collaborators and storage keys.
    #[must_use]
    pub fn new(repository: R, storage: S, session_key: &str, bookmark_key: &str) -> Self {
        Self {
            session: SessionStore::new(repository, storage.clone(), session_key),
            bookmarks: BookmarkStore::new(storage, bookmark_key),
        }
    }

    /// Hydrates both stores from storage.
    pub async fn hydrate(&self) {
        let session = self.session.hydrate().await;
        let bookmarks = self.bookmarks.hydrate().await;
        tracing::debug!(session, bookmarks, "stores hydrated");
    }
}

impl Stores<RtdbUserRepository, FileStorage> {
    /// Builds and hydrates the stores described by `config`: a REST
    /// repository against the record service and file-backed storage.
    pub async fn open(config: &AppConfig) -> Self {
        let repository = RtdbUserRepository::new(
            config.record_service_url.clone(),
            config.record_service_auth.clone(),
        );
        let storage = FileStorage::new(&config.storage_dir);
        let stores = Self {
            session: SessionStore::new(
                repository,
                storage.clone(),
                config.session_storage_key.as_str(),
            ),
            bookmarks: BookmarkStore::new(storage, config.bookmark_storage_key.as_str())
                .with_default_limit(config.recently_viewed_default_limit),
        };
        stores.hydrate().await;
        stores
    }
}
