//! Query parameters and system response bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;

/// Query string accepted by collection and record endpoints.
///
/// `orderBy` and `equalTo` carry JSON-encoded values, so a child name is
/// sent as `orderBy="email"` and a string match as `equalTo="a@b.com"`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordQuery {
    /// JSON-encoded name of the child to filter on.
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
    /// JSON-encoded value the child must equal.
    #[serde(rename = "equalTo")]
    pub equal_to: Option<String>,
    /// Access token. Accepted and ignored.
    #[serde(default)]
    pub auth: Option<String>,
}

/// Parsed child filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildFilter {
    /// Child name.
    pub child: String,
    /// Value the child must equal.
    pub value: Value,
}

impl RecordQuery {
    /// Decodes the `orderBy`/`equalTo` pair.
    ///
    /// Returns `Ok(None)` when no equality filter was requested.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRequest`] if either parameter is not
    /// valid JSON, `orderBy` is not a string, or `equalTo` is given
    /// without `orderBy`.
    pub fn child_filter(&self) -> Result<Option<ChildFilter>, StoreError> {
        let Some(equal_to) = &self.equal_to else {
            return Ok(None);
        };
        let Some(order_by) = &self.order_by else {
            return Err(StoreError::InvalidRequest(
                "equalTo requires orderBy".to_string(),
            ));
        };
        let child: String = serde_json::from_str(order_by).map_err(|e| {
            StoreError::InvalidRequest(format!("orderBy must be a JSON string: {e}"))
        })?;
        let value: Value = serde_json::from_str(equal_to)
            .map_err(|e| StoreError::InvalidRequest(format!("equalTo must be JSON: {e}")))?;
        Ok(Some(ChildFilter { child, value }))
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"healthy"`.
    pub status: String,
    /// RFC 3339 timestamp.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
    /// Number of stored user records.
    pub records: usize,
}
