//! Application configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Unset or unparsable values fall back to defaults, except
//! for the two addresses, which must parse when present.

use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::Url;

/// Default storage name for the persisted session slice.
pub const DEFAULT_SESSION_STORAGE_KEY: &str = "user-state";

/// Default storage name for the persisted bookmark slice.
pub const DEFAULT_BOOKMARK_STORAGE_KEY: &str = "event-bookmarks";

/// Top-level configuration.
///
/// Loaded once at startup via [`AppConfig::from_env`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address the record-service emulator binds to.
    pub listen_addr: SocketAddr,

    /// Base URL of the remote user-record service.
    pub record_service_url: Url,

    /// Optional auth token sent as the `auth` query parameter.
    pub record_service_auth: Option<String>,

    /// Directory holding file-backed secure storage.
    pub storage_dir: PathBuf,

    /// Storage name for the session slice.
    pub session_storage_key: String,

    /// Storage name for the bookmark slice.
    pub bookmark_storage_key: String,

    /// Default number of recently viewed ids returned to callers.
    pub recently_viewed_default_limit: usize,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` cannot be parsed as a
    /// [`SocketAddr`] or `RECORD_SERVICE_URL` is not a valid URL.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:9000".to_string())
            .parse()?;

        let record_service_url = Url::parse(
            &std::env::var("RECORD_SERVICE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:9000".to_string()),
        )?;

        let record_service_auth = std::env::var("RECORD_SERVICE_AUTH")
            .ok()
            .filter(|token| !token.is_empty());

        let storage_dir = PathBuf::from(
            std::env::var("STORAGE_DIR").unwrap_or_else(|_| ".evently".to_string()),
        );

        let session_storage_key = std::env::var("SESSION_STORAGE_KEY")
            .unwrap_or_else(|_| DEFAULT_SESSION_STORAGE_KEY.to_string());
        let bookmark_storage_key = std::env::var("BOOKMARK_STORAGE_KEY")
            .unwrap_or_else(|_| DEFAULT_BOOKMARK_STORAGE_KEY.to_string());

        let recently_viewed_default_limit = parse_env("RECENTLY_VIEWED_DEFAULT_LIMIT", 5);

        Ok(Self {
            listen_addr,
            record_service_url,
            record_service_auth,
            storage_dir,
            session_storage_key,
            bookmark_storage_key,
            recently_viewed_default_limit,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
