//! REST endpoint handlers organized by resource.

pub mod system;
pub mod users;

use axum::Router;

use crate::app_state::AppState;

/// Composes all record routes.
pub fn routes() -> Router<AppState> {
    Router::new().merge(users::routes())
}
