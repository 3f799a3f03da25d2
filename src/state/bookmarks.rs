//! Bookmark state: saved event snapshots and the recency sequence.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::Reducer;
use crate::domain::Event;

/// Maximum length of the recency sequence.
pub const RECENTLY_VIEWED_CAPACITY: usize = 10;

/// Persisted bookmark slice.
///
/// Serialized as `{ bookmarkedEvents, recentlyViewed }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkState {
    /// Event snapshots keyed by event id, captured at bookmark time.
    #[serde(default)]
    pub bookmarked_events: HashMap<String, Event>,
    /// Viewed event ids, most recent first, deduplicated, at most
    /// [`RECENTLY_VIEWED_CAPACITY`] long.
    #[serde(default)]
    pub recently_viewed: Vec<String>,
}

impl BookmarkState {
    /// Returns `true` if `event_id` is bookmarked.
    #[must_use]
    pub fn is_bookmarked(&self, event_id: &str) -> bool {
        self.bookmarked_events.contains_key(event_id)
    }

    /// Returns every bookmarked snapshot, in no particular order.
    #[must_use]
    pub fn bookmarked_events(&self) -> Vec<Event> {
        self.bookmarked_events.values().cloned().collect()
    }

    /// Returns the first `limit` ids of the recency sequence.
    #[must_use]
    pub fn recently_viewed(&self, limit: usize) -> Vec<String> {
        self.recently_viewed.iter().take(limit).cloned().collect()
    }

    /// Returns snapshots of recently viewed events that are still
    /// bookmarked, most recent first, at most `limit` of them.
    #[must_use]
    pub fn recently_viewed_bookmarks(&self, limit: usize) -> Vec<Event> {
        self.recently_viewed
            .iter()
            .filter_map(|id| self.bookmarked_events.get(id))
            .take(limit)
            .cloned()
            .collect()
    }
}

/// Transitions of the bookmark state.
#[derive(Debug, Clone, PartialEq)]
pub enum BookmarkAction {
    /// Insert or overwrite the snapshot under the event's id.
    Bookmarked(Event),
    /// Remove the snapshot for this id, if any.
    Unbookmarked(String),
    /// Bookmark if absent, otherwise remove.
    Toggled(Event),
    /// Empty the bookmark mapping. Recency is untouched.
    Cleared,
    /// Move the id to the front of the recency sequence.
    Viewed(String),
}

/// Reducer for [`BookmarkState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BookmarkReducer;

impl Reducer for BookmarkReducer {
    type State = BookmarkState;
    type Action = BookmarkAction;

    fn reduce(state: &mut BookmarkState, action: &BookmarkAction) {
        match action {
            BookmarkAction::Bookmarked(event) => {
                state
                    .bookmarked_events
                    .insert(event.id.clone(), event.clone());
            }
            BookmarkAction::Unbookmarked(event_id) => {
                state.bookmarked_events.remove(event_id);
            }
            BookmarkAction::Toggled(event) => {
                if state.bookmarked_events.remove(&event.id).is_none() {
                    state
                        .bookmarked_events
                        .insert(event.id.clone(), event.clone());
                }
            }
            BookmarkAction::Cleared => state.bookmarked_events.clear(),
            BookmarkAction::Viewed(event_id) => {
                state.recently_viewed.retain(|id| id != event_id);
                state.recently_viewed.insert(0, event_id.clone());
                state.recently_viewed.truncate(RECENTLY_VIEWED_CAPACITY);
            }
        }
    }

    fn normalize(state: &mut BookmarkState) {
        let mut seen = HashSet::new();
        state.recently_viewed.retain(|id| seen.insert(id.clone()));
        state.recently_viewed.truncate(RECENTLY_VIEWED_CAPACITY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::fixtures::event;

    fn apply(state: &mut BookmarkState, action: BookmarkAction) {
        BookmarkReducer::reduce(state, &action);
    }

    fn assert_recency_invariants(state: &BookmarkState) {
        assert!(state.recently_viewed.len() <= RECENTLY_VIEWED_CAPACITY);
        let unique: HashSet<_> = state.recently_viewed.iter().collect();
        assert_eq!(unique.len(), state.recently_viewed.len());
    }

    #[test]
    fn add_then_remove_toggles_membership() {
        let mut state = BookmarkState::default();
        apply(&mut state, BookmarkAction::Bookmarked(event("e1")));
        assert!(state.is_bookmarked("e1"));
        apply(&mut state, BookmarkAction::Unbookmarked("e1".to_string()));
        assert!(!state.is_bookmarked("e1"));
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut state = BookmarkState::default();
        apply(&mut state, BookmarkAction::Bookmarked(event("e1")));
        apply(&mut state, BookmarkAction::Unbookmarked("missing".to_string()));
        assert_eq!(state.bookmarked_events.len(), 1);
    }

    #[test]
    fn re_adding_overwrites_snapshot() {
        let mut state = BookmarkState::default();
        apply(&mut state, BookmarkAction::Bookmarked(event("e1")));
        let mut renamed = event("e1");
        renamed.title = "Renamed".to_string();
        apply(&mut state, BookmarkAction::Bookmarked(renamed));

        assert_eq!(state.bookmarked_events.len(), 1);
        assert_eq!(
            state.bookmarked_events.get("e1").map(|e| e.title.as_str()),
            Some("Renamed")
        );
    }

    #[test]
    fn toggle_twice_restores_membership() {
        let mut state = BookmarkState::default();
        apply(&mut state, BookmarkAction::Toggled(event("e1")));
        assert!(state.is_bookmarked("e1"));
        apply(&mut state, BookmarkAction::Toggled(event("e1")));
        assert!(!state.is_bookmarked("e1"));

        apply(&mut state, BookmarkAction::Bookmarked(event("e2")));
        apply(&mut state, BookmarkAction::Toggled(event("e2")));
        apply(&mut state, BookmarkAction::Toggled(event("e2")));
        assert!(state.is_bookmarked("e2"));
    }

    #[test]
    fn clear_keeps_recency() {
        let mut state = BookmarkState::default();
        apply(&mut state, BookmarkAction::Bookmarked(event("e1")));
        apply(&mut state, BookmarkAction::Viewed("e1".to_string()));
        apply(&mut state, BookmarkAction::Cleared);
        assert!(state.bookmarked_events.is_empty());
        assert_eq!(state.recently_viewed, vec!["e1".to_string()]);
    }

    #[test]
    fn recency_orders_most_recent_first() {
        let mut state = BookmarkState::default();
        apply(&mut state, BookmarkAction::Viewed("x".to_string()));
        apply(&mut state, BookmarkAction::Viewed("y".to_string()));
        assert_eq!(state.recently_viewed, vec!["y".to_string(), "x".to_string()]);

        apply(&mut state, BookmarkAction::Viewed("x".to_string()));
        assert_eq!(state.recently_viewed, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn recency_is_bounded_and_unique_for_any_sequence() {
        let mut state = BookmarkState::default();
        // Deterministic pseudo-random walk over 15 ids.
        let mut seed: u64 = 0x2545_f491;
        for _ in 0..500 {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let id = format!("e{}", (seed >> 33) % 15);
            apply(&mut state, BookmarkAction::Viewed(id.clone()));
            assert_eq!(state.recently_viewed.first(), Some(&id));
            assert_recency_invariants(&state);
        }
        assert_eq!(state.recently_viewed.len(), RECENTLY_VIEWED_CAPACITY);
    }

    #[test]
    fn recently_viewed_respects_limit() {
        let mut state = BookmarkState::default();
        for i in 0..8 {
            apply(&mut state, BookmarkAction::Viewed(format!("e{i}")));
        }
        assert_eq!(state.recently_viewed(5).len(), 5);
        assert_eq!(state.recently_viewed(5).first().map(String::as_str), Some("e7"));
        assert_eq!(state.recently_viewed(50).len(), 8);
    }

    #[test]
    fn recently_viewed_bookmarks_intersects_in_recency_order() {
        let mut state = BookmarkState::default();
        apply(&mut state, BookmarkAction::Bookmarked(event("a")));
        apply(&mut state, BookmarkAction::Bookmarked(event("c")));
        for id in ["a", "b", "c"] {
            apply(&mut state, BookmarkAction::Viewed(id.to_string()));
        }
        let ids: Vec<String> = state
            .recently_viewed_bookmarks(5)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["c".to_string(), "a".to_string()]);
    }

    #[test]
    fn normalize_repairs_tampered_recency() {
        let mut state = BookmarkState {
            bookmarked_events: HashMap::new(),
            recently_viewed: (0..14).map(|i| format!("e{}", i % 12)).collect(),
        };
        BookmarkReducer::normalize(&mut state);
        assert_recency_invariants(&state);
        assert_eq!(state.recently_viewed.first().map(String::as_str), Some("e0"));
    }
}
