//! Pure state-transition core.
//!
//! Each store is split in two layers. The reducers in this module apply
//! actions to plain state values and never touch I/O, so every business
//! rule is testable in isolation. [`crate::storage::Persisted`] wraps a
//! reducer, serializes the state after every transition, and hydrates it
//! on startup.

pub mod bookmarks;
pub mod session;

pub use bookmarks::{BookmarkAction, BookmarkReducer, BookmarkState, RECENTLY_VIEWED_CAPACITY};
pub use session::{SessionAction, SessionPhase, SessionReducer, SessionState};

/// A pure state machine over a serializable state value.
pub trait Reducer {
    /// State value, also the persisted slice.
    type State;
    /// Transition applied to the state.
    type Action;

    /// Applies `action` to `state` in place.
    fn reduce(state: &mut Self::State, action: &Self::Action);

    /// Restores invariants on a state read back from storage.
    ///
    /// The default keeps the state as-is.
    fn normalize(_state: &mut Self::State) {}
}
