//! Record-service emulator: an in-memory Realtime-Database-style REST API.
//!
//! Serves the `users` collection the [`RtdbUserRepository`] talks to, so
//! the stores can run end to end without a hosted database.
//!
//! [`RtdbUserRepository`]: crate::repository::RtdbUserRepository

pub mod dto;
pub mod handlers;
pub mod record_db;

pub use record_db::RecordDb;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Builds the complete emulator router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(handlers::routes())
        .merge(handlers::system::routes())
}

/// Builds the router with its state and HTTP layers applied.
pub fn app(state: AppState) -> Router {
    build_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
