//! User record handlers: list, get, put, patch, delete.
//!
//! Record paths end in `.json`, as the Realtime Database REST protocol
//! requires. Reads of an absent record answer `200` with `null`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use crate::api::dto::RecordQuery;
use crate::app_state::AppState;
use crate::error::StoreError;

const JSON_SUFFIX: &str = ".json";

/// Strips the `.json` suffix from a record path segment.
fn record_key(segment: &str) -> Result<&str, StoreError> {
    segment
        .strip_suffix(JSON_SUFFIX)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| StoreError::NotFound(format!("{segment} is not a .json record path")))
}

/// `GET /users.json`: Whole collection, or the records whose child
/// matches `orderBy`/`equalTo`.
///
/// An empty collection is `null`; an empty query result is `{}`.
///
/// # Errors
///
/// Returns [`StoreError::InvalidRequest`] on a malformed query.
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
) -> Result<impl IntoResponse, StoreError> {
    let body = match query.child_filter()? {
        Some(filter) => serde_json::to_value(state.db.query(&filter.child, &filter.value).await)?,
        None => {
            let all = state.db.all().await;
            if all.is_empty() {
                Value::Null
            } else {
                serde_json::to_value(all)?
            }
        }
    };
    Ok((StatusCode::OK, Json(body)))
}

/// `GET /users/{key}.json`: One record, or `null`.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] if the path does not end in `.json`.
pub async fn get_user(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<impl IntoResponse, StoreError> {
    let key = record_key(&segment)?;
    let body = state.db.get(key).await.map_or(Value::Null, Value::Object);
    Ok((StatusCode::OK, Json(body)))
}

/// `PUT /users/{key}.json`: Replace a record. Echoes the stored body.
///
/// # Errors
///
/// Returns [`StoreError::InvalidRequest`] if the body is not an object.
pub async fn put_user(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, StoreError> {
    let key = record_key(&segment)?;
    let record = state.db.put(key, body).await?;
    tracing::info!(key, "user record written");
    Ok((StatusCode::OK, Json(Value::Object(record))))
}

/// `PATCH /users/{key}.json`: Merge top-level children into a record.
/// Returns the merged record.
///
/// # Errors
///
/// Returns [`StoreError::InvalidRequest`] if the body is not an object.
pub async fn patch_user(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, StoreError> {
    let key = record_key(&segment)?;
    let record = state.db.patch(key, body).await?;
    Ok((StatusCode::OK, Json(Value::Object(record))))
}

/// `DELETE /users/{key}.json`: Remove a record. Absent records succeed.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] if the path does not end in `.json`.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<impl IntoResponse, StoreError> {
    let key = record_key(&segment)?;
    if state.db.delete(key).await {
        tracing::info!(key, "user record deleted");
    }
    Ok((StatusCode::OK, Json(Value::Null)))
}

/// User collection routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users.json", get(list_users))
        .route(
            "/users/{segment}",
            get(get_user)
                .put(put_user)
                .patch(patch_user)
                .delete(delete_user),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_key_requires_json_suffix() {
        assert!(matches!(record_key("a@b,com.json"), Ok("a@b,com")));
        assert!(matches!(record_key("a@b,com"), Err(StoreError::NotFound(_))));
        assert!(matches!(record_key(".json"), Err(StoreError::NotFound(_))));
    }
}
