//! REST client for a Realtime-Database-style JSON store.
//!
//! Records live at `{base}/users/{encoded-email}.json`. Reads of an absent
//! path return the JSON literal `null`. Writes use `PUT` for creation and
//! `PATCH` for merges, and an optional `auth` query parameter carries the
//! access token.

use std::collections::BTreeMap;

use chrono::Utc;
use reqwest::{Client, Url};

use super::UserRepository;
use crate::domain::{EncodedEmail, NewUser, User, UserId, UserPatch};
use crate::error::StoreError;

/// Path of the users collection under the base URL.
pub const USERS_PATH: &str = "users";

/// [`UserRepository`] over the Realtime Database REST protocol.
#[derive(Debug, Clone)]
pub struct RtdbUserRepository {
    client: Client,
    base: Url,
    auth: Option<String>,
}

impl RtdbUserRepository {
    /// Creates a repository with a default HTTP client.
    #[must_use]
    pub fn new(base: Url, auth: Option<String>) -> Self {
        Self::with_client(Client::new(), base, auth)
    }

    /// Creates a repository reusing an existing HTTP client.
    #[must_use]
    pub fn with_client(client: Client, base: Url, auth: Option<String>) -> Self {
        Self { client, base, auth }
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// URL of the whole users collection.
    fn collection_url(&self) -> Result<Url, StoreError> {
        self.url_for(&[format!("{USERS_PATH}.json").as_str()])
    }

    /// URL of one user record.
    fn record_url(&self, key: &EncodedEmail) -> Result<Url, StoreError> {
        self.url_for(&[USERS_PATH, format!("{key}.json").as_str()])
    }

    fn url_for(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| StoreError::Internal(format!("base url {} cannot hold a path", self.base)))?
            .pop_if_empty()
            .extend(segments);
        if let Some(token) = &self.auth {
            url.query_pairs_mut().append_pair("auth", token);
        }
        Ok(url)
    }
}

fn read_error(err: &reqwest::Error) -> StoreError {
    StoreError::RemoteRead(err.to_string())
}

fn write_error(err: &reqwest::Error) -> StoreError {
    StoreError::RemoteWrite(err.to_string())
}

impl UserRepository for RtdbUserRepository {
    async fn create_user(&self, draft: &NewUser) -> Result<User, StoreError> {
        let user = User::from_draft(draft.clone(), UserId::generate(), Utc::now());
        let key = user.key();
        let url = self.record_url(&key)?;

        self.client
            .put(url)
            .json(&user)
            .send()
            .await
            .map_err(|e| write_error(&e))?
            .error_for_status()
            .map_err(|e| write_error(&e))?;

        tracing::info!(%key, id = %user.id, "user created");
        Ok(user)
    }

    async fn fetch_user(&self, key: &EncodedEmail) -> Result<Option<User>, StoreError> {
        let url = self.record_url(key)?;
        let user: Option<User> = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| read_error(&e))?
            .error_for_status()
            .map_err(|e| read_error(&e))?
            .json()
            .await
            .map_err(|e| read_error(&e))?;

        if user.is_none() {
            tracing::debug!(%key, "no user found");
        }
        Ok(user)
    }

    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let mut url = self.collection_url()?;
        url.query_pairs_mut()
            .append_pair("orderBy", "\"email\"")
            .append_pair("equalTo", &serde_json::Value::from(email).to_string());

        let matches: Option<BTreeMap<String, User>> = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| read_error(&e))?
            .error_for_status()
            .map_err(|e| read_error(&e))?
            .json()
            .await
            .map_err(|e| read_error(&e))?;

        Ok(matches.and_then(|users| users.into_values().next()))
    }

    async fn update_user(&self, key: &EncodedEmail, patch: &UserPatch) -> Result<User, StoreError> {
        let mut user = self
            .fetch_user(key)
            .await
            .map_err(|e| StoreError::RemoteWrite(e.to_string()))?
            .ok_or_else(|| StoreError::RemoteWrite(format!("user {} not found", key.decode())))?;

        user.apply(patch, Utc::now());

        let url = self.record_url(key)?;
        self.client
            .patch(url)
            .json(&user)
            .send()
            .await
            .map_err(|e| write_error(&e))?
            .error_for_status()
            .map_err(|e| write_error(&e))?;

        tracing::debug!(%key, "user updated");
        Ok(user)
    }

    async fn delete_user(&self, key: &EncodedEmail) -> Result<(), StoreError> {
        let url = self.record_url(key)?;
        self.client
            .delete(url)
            .send()
            .await
            .map_err(|e| write_error(&e))?
            .error_for_status()
            .map_err(|e| write_error(&e))?;

        tracing::info!(%key, "user deleted");
        Ok(())
    }
}
