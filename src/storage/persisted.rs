//! In-memory state mirrored to secure storage.
//!
//! [`Persisted`] owns the authoritative copy of a reducer's state. Every
//! dispatched action is applied under a write lock, published on the
//! store's [`EventBus`], and the new state is written to storage as
//! `{ "state": <slice>, "version": 0 }`. Storage failures are logged and
//! swallowed: the in-memory state stays authoritative and persistence is
//! best-effort.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, broadcast};

use super::SecureStorage;
use crate::domain::EventBus;
use crate::domain::event_bus::DEFAULT_CAPACITY;
use crate::state::Reducer;

/// Version written into every persisted envelope.
pub const SCHEMA_VERSION: u32 = 0;

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    state: &'a T,
    version: u32,
}

#[derive(Deserialize)]
struct Envelope<T> {
    state: T,
    version: u32,
}

/// A reducer's state kept in memory and synced to [`SecureStorage`].
pub struct Persisted<R: Reducer, S> {
    state: RwLock<R::State>,
    storage: S,
    key: String,
    bus: EventBus<R::Action>,
    _reducer: PhantomData<fn() -> R>,
}

impl<R, S> Persisted<R, S>
where
    R: Reducer,
    R::State: Serialize + DeserializeOwned + Default + Clone + Send + Sync,
    R::Action: Clone + Send + fmt::Debug,
    S: SecureStorage,
{
    /// Creates an empty store persisted under `key`.
    ///
    /// Call [`Persisted::hydrate`] to load a previous snapshot.
    #[must_use]
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(R::State::default()),
            storage,
            key: key.into(),
            bus: EventBus::new(DEFAULT_CAPACITY),
            _reducer: PhantomData,
        }
    }

    /// Returns the storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the underlying storage.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Replaces the in-memory state with the persisted snapshot, if any.
    ///
    /// Returns `true` when a snapshot was loaded. Unreadable, unparsable,
    /// or version-mismatched snapshots are logged and ignored, leaving the
    /// current state untouched.
    pub async fn hydrate(&self) -> bool {
        let raw = match self.storage.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "secure storage read failed");
                return false;
            }
        };

        let envelope: Envelope<R::State> = match serde_json::from_str(&raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding unreadable snapshot");
                return false;
            }
        };

        if envelope.version != SCHEMA_VERSION {
            tracing::warn!(
                key = %self.key,
                version = envelope.version,
                expected = SCHEMA_VERSION,
                "discarding snapshot with unknown version"
            );
            return false;
        }

        let mut loaded = envelope.state;
        R::normalize(&mut loaded);
        *self.state.write().await = loaded;
        tracing::debug!(key = %self.key, "state hydrated");
        true
    }

    /// Applies `action`, announces it, and writes the new state to storage.
    pub async fn dispatch(&self, action: R::Action) {
        self.dispatch_then(action, |_| ()).await;
    }

    /// Like [`Persisted::dispatch`], then runs `f` against the new state
    /// before the write lock is released.
    pub async fn dispatch_then<T>(&self, action: R::Action, f: impl FnOnce(&R::State) -> T) -> T {
        let mut state = self.state.write().await;
        R::reduce(&mut state, &action);
        tracing::trace!(key = %self.key, ?action, "action applied");
        self.bus.publish(action);
        self.write_snapshot(&state).await;
        f(&state)
    }

    /// Applies `action`, announces it, and deletes the persisted snapshot
    /// instead of writing one.
    pub async fn dispatch_and_erase(&self, action: R::Action) {
        let mut state = self.state.write().await;
        R::reduce(&mut state, &action);
        tracing::trace!(key = %self.key, ?action, "action applied");
        self.bus.publish(action);
        self.erase_snapshot().await;
    }

    /// Deletes the persisted snapshot without touching in-memory state.
    pub async fn erase(&self) {
        let _guard = self.state.write().await;
        self.erase_snapshot().await;
    }

    /// Runs `f` against the current state.
    pub async fn read<T>(&self, f: impl FnOnce(&R::State) -> T) -> T {
        let state = self.state.read().await;
        f(&state)
    }

    /// Returns a clone of the current state.
    pub async fn snapshot(&self) -> R::State {
        self.state.read().await.clone()
    }

    /// Subscribes to every action applied from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<R::Action> {
        self.bus.subscribe()
    }

    async fn write_snapshot(&self, state: &R::State) {
        let envelope = EnvelopeRef {
            state,
            version: SCHEMA_VERSION,
        };
        let raw = match serde_json::to_string(&envelope) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "state serialization failed");
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.key, &raw).await {
            tracing::warn!(key = %self.key, error = %e, "secure storage write failed");
        }
    }

    async fn erase_snapshot(&self) {
        if let Err(e) = self.storage.delete(&self.key).await {
            tracing::warn!(key = %self.key, error = %e, "secure storage delete failed");
        }
    }
}

impl<R: Reducer, S> fmt::Debug for Persisted<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persisted")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
