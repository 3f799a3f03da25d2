//! Bookmark store: saved events and recently viewed ids.
//!
//! Purely local and independent of authentication.

use tokio::sync::broadcast;

use crate::domain::Event;
use crate::state::{BookmarkAction, BookmarkReducer, BookmarkState, RECENTLY_VIEWED_CAPACITY};
use crate::storage::{Persisted, SecureStorage};

/// Number of recently viewed ids returned when the caller gives no limit.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Bookmark store over a [`SecureStorage`].
#[derive(Debug)]
pub struct BookmarkStore<S> {
    state: Persisted<BookmarkReducer, S>,
    default_limit: usize,
}

impl<S: SecureStorage> BookmarkStore<S> {
    /// Creates an empty store persisted under `key`.
    #[must_use]
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            state: Persisted::new(storage, key),
            default_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    /// Overrides the limit used by [`BookmarkStore::recently_viewed_events`]
    /// when called with `None`.
    #[must_use]
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Loads the persisted bookmarks, if any. Returns `true` when found.
    pub async fn hydrate(&self) -> bool {
        self.state.hydrate().await
    }

    /// Returns `true` if `event_id` is bookmarked.
    pub async fn is_bookmarked(&self, event_id: &str) -> bool {
        self.state.read(|s| s.is_bookmarked(event_id)).await
    }

    /// Stores a snapshot of `event`, replacing any earlier one.
    pub async fn add_bookmark(&self, event: Event) {
        self.state.dispatch(BookmarkAction::Bookmarked(event)).await;
    }

    /// Removes the bookmark for `event_id`. Absent ids are ignored.
    pub async fn remove_bookmark(&self, event_id: &str) {
        self.state
            .dispatch(BookmarkAction::Unbookmarked(event_id.to_string()))
            .await;
    }

    /// Bookmarks `event` if absent, otherwise removes it. Returns whether
    /// the event is bookmarked afterwards.
    pub async fn toggle_bookmark(&self, event: Event) -> bool {
        let event_id = event.id.clone();
        self.state
            .dispatch_then(BookmarkAction::Toggled(event), |s| s.is_bookmarked(&event_id))
            .await
    }

    /// Removes every bookmark. Recently viewed ids are kept.
    pub async fn clear_all_bookmarks(&self) {
        self.state.dispatch(BookmarkAction::Cleared).await;
    }

    /// Returns all bookmarked snapshots, in no particular order.
    pub async fn bookmarked_events(&self) -> Vec<Event> {
        self.state.read(BookmarkState::bookmarked_events).await
    }

    /// Moves `event_id` to the front of the recency sequence, keeping at
    /// most the ten most recent ids.
    pub async fn add_to_recently_viewed(&self, event_id: &str) {
        self.state
            .dispatch(BookmarkAction::Viewed(event_id.to_string()))
            .await;
    }

    /// Returns the first `limit` recently viewed ids (default 5), most
    /// recent first. Bookmark status is not considered.
    pub async fn recently_viewed_events(&self, limit: Option<usize>) -> Vec<String> {
        let limit = limit.unwrap_or(self.default_limit);
        self.state.read(|s| s.recently_viewed(limit)).await
    }

    /// Returns snapshots of recently viewed events that are bookmarked,
    /// most recent first. `None` returns all of them.
    pub async fn recently_viewed_bookmarks(&self, limit: Option<usize>) -> Vec<Event> {
        let limit = limit.unwrap_or(RECENTLY_VIEWED_CAPACITY);
        self.state.read(|s| s.recently_viewed_bookmarks(limit)).await
    }

    /// Returns a clone of the whole bookmark state.
    pub async fn snapshot(&self) -> BookmarkState {
        self.state.snapshot().await
    }

    /// Subscribes to every bookmark transition from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BookmarkAction> {
        self.state.subscribe()
    }
}
