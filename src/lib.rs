//! # evently
//!
//! Client-side state for an event discovery and ticketing app.
//!
//! The crate holds two long-lived stores consumed by the UI layer:
//!
//! - [`store::SessionStore`]: the signed-in user, auth token, and session id,
//!   with user-record CRUD delegated to a remote [`repository::UserRepository`].
//! - [`store::BookmarkStore`]: bookmarked event snapshots and a bounded,
//!   most-recent-first list of viewed event ids.
//!
//! Both persist their full state to a [`storage::SecureStorage`] after every
//! mutation and restore it on [`hydrate`](store::SessionStore::hydrate).
//!
//! ## Architecture
//!
//! ```text
//! UI
//!  │
//!  ├── SessionStore ──── UserRepository (RTDB REST / in-memory)
//!  ├── BookmarkStore
//!  │        │
//!  │   Persisted<Reducer> (state/, storage/)
//!  │        │
//!  │   SecureStorage (file / in-memory)
//!  │
//!  └── catalog (filter, upcoming, top selling, map region)
//!
//! evently binary: record-service emulator (api/)
//! ```

pub mod api;
pub mod app_state;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
pub mod state;
pub mod storage;
pub mod store;
