//! Session store: the authoritative copy of who is logged in.

use tokio::sync::broadcast;

use crate::domain::{EncodedEmail, Event, NewUser, SessionId, User, UserPatch};
use crate::error::StoreError;
use crate::repository::UserRepository;
use crate::state::{SessionAction, SessionPhase, SessionReducer, SessionState};
use crate::storage::{Persisted, SecureStorage};

/// Session store over a [`UserRepository`] and a [`SecureStorage`].
///
/// Every mutation is applied to the in-memory state first; the persisted
/// copy follows it and storage failures never surface. Remote failures
/// always surface, and nothing is retried.
#[derive(Debug)]
pub struct SessionStore<R, S> {
    repository: R,
    state: Persisted<SessionReducer, S>,
}

impl<R, S> SessionStore<R, S>
where
    R: UserRepository,
    S: SecureStorage,
{
    /// Creates an anonymous store persisted under `key`.
    #[must_use]
    pub fn new(repository: R, storage: S, key: impl Into<String>) -> Self {
        Self {
            repository,
            state: Persisted::new(storage, key),
        }
    }

    /// Returns the user repository.
    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Loads the persisted session, if any. Returns `true` when one was found.
    pub async fn hydrate(&self) -> bool {
        self.state.hydrate().await
    }

    /// Creates a remote record from `draft` and adopts it as the current
    /// user. Does not authenticate the session.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError::RemoteWrite`] from the repository; the
    /// state is left untouched.
    pub async fn create_user(&self, draft: NewUser) -> Result<User, StoreError> {
        let user = self
            .repository
            .create_user(&draft)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "failed to create user"))?;
        self.state
            .dispatch(SessionAction::UserCreated(user.clone()))
            .await;
        Ok(user)
    }

    /// Adopts `user` directly and marks the session authenticated.
    pub async fn set_user(&self, user: User) {
        self.state.dispatch(SessionAction::UserSet(user)).await;
    }

    /// Looks up the record under `key`.
    ///
    /// When found, the record becomes the current user and the session is
    /// authenticated. When absent, returns `Ok(None)` and leaves the state
    /// untouched.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError::RemoteRead`] from the repository.
    pub async fn fetch_user(&self, key: &EncodedEmail) -> Result<Option<User>, StoreError> {
        let found = self
            .repository
            .fetch_user(key)
            .await
            .inspect_err(|e| tracing::error!(%key, error = %e, "failed to fetch user"))?;
        if let Some(user) = &found {
            self.state
                .dispatch(SessionAction::UserFetched(user.clone()))
                .await;
        }
        Ok(found)
    }

    /// Merges `patch` onto the current user and writes it back remotely,
    /// addressed by the current user's email.
    ///
    /// Returns `Ok(None)` without any remote call when no user is loaded.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError::RemoteWrite`] from the repository.
    pub async fn update_user(&self, patch: UserPatch) -> Result<Option<User>, StoreError> {
        let Some(key) = self.state.read(|s| s.user.as_ref().map(User::key)).await else {
            tracing::warn!("update skipped: no user loaded");
            return Ok(None);
        };

        let updated = self
            .repository
            .update_user(&key, &patch)
            .await
            .inspect_err(|e| tracing::error!(%key, error = %e, "failed to update user"))?;
        self.state
            .dispatch(SessionAction::UserUpdated(updated.clone()))
            .await;
        Ok(Some(updated))
    }

    /// Records a ticket purchase by appending the event snapshot to the
    /// current user's purchased tickets.
    ///
    /// Returns `Ok(None)` without any remote call when no user is loaded.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError::RemoteWrite`] from the repository.
    pub async fn purchase_ticket(&self, event: Event) -> Result<Option<User>, StoreError> {
        let Some(mut tickets) = self
            .state
            .read(|s| s.user.as_ref().map(|u| u.tickets_purchased.clone()))
            .await
        else {
            tracing::warn!(event_id = %event.id, "purchase skipped: no user loaded");
            return Ok(None);
        };

        let event_id = event.id.clone();
        tickets.push(event);
        let updated = self
            .update_user(UserPatch {
                tickets_purchased: Some(tickets),
                ..UserPatch::default()
            })
            .await?;
        if updated.is_some() {
            tracing::info!(%event_id, "ticket purchased");
        }
        Ok(updated)
    }

    /// Signs `user` in with the provider's `auth_token` and a freshly
    /// generated session id, which is returned. No remote call is made.
    pub async fn login(&self, auth_token: impl Into<String>, user: User) -> SessionId {
        let session_id = SessionId::generate();
        self.state
            .dispatch(SessionAction::LoggedIn {
                auth_token: auth_token.into(),
                user,
                session_id: session_id.clone(),
            })
            .await;
        tracing::info!(%session_id, "logged in");
        session_id
    }

    /// Clears every session field and erases the persisted snapshot.
    /// Calling it while logged out changes nothing.
    pub async fn logout(&self) {
        self.state.dispatch_and_erase(SessionAction::LoggedOut).await;
        tracing::info!("logged out");
    }

    /// Erases the persisted snapshot, keeping the in-memory session.
    pub async fn clear_storage(&self) {
        self.state.erase().await;
    }

    /// Replaces the session id.
    pub async fn set_session_id(&self, session_id: SessionId) {
        self.state
            .dispatch(SessionAction::SessionIdAssigned(session_id))
            .await;
    }

    /// Returns the current user.
    pub async fn user(&self) -> Option<User> {
        self.state.read(|s| s.user.clone()).await
    }

    /// Returns `true` while a user is signed in.
    pub async fn is_authenticated(&self) -> bool {
        self.state.read(|s| s.is_authenticated).await
    }

    /// Returns the provider token of the current session.
    pub async fn auth_token(&self) -> Option<String> {
        self.state.read(|s| s.auth_token.clone()).await
    }

    /// Returns the current session id.
    pub async fn session_id(&self) -> Option<SessionId> {
        self.state.read(|s| s.session_id.clone()).await
    }

    /// Returns the current phase.
    pub async fn phase(&self) -> SessionPhase {
        self.state.read(SessionState::phase).await
    }

    /// Returns a clone of the whole session state.
    pub async fn snapshot(&self) -> SessionState {
        self.state.snapshot().await
    }

    /// Subscribes to every session transition from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionAction> {
        self.state.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::domain::event::fixtures::event;
    use crate::domain::user::fixtures::user;
    use crate::repository::InMemoryUserRepository;
    use crate::storage::MemoryStorage;

    type Store = SessionStore<InMemoryUserRepository, MemoryStorage>;

    fn make_store() -> (Store, InMemoryUserRepository, MemoryStorage) {
        let repo = InMemoryUserRepository::new();
        let storage = MemoryStorage::new();
        let store = SessionStore::new(repo.clone(), storage.clone(), "user-state");
        (store, repo, storage)
    }

    #[tokio::test]
    async fn create_user_returns_fresh_record() {
        let (store, _, _) = make_store();
        let Ok(created) = store.create_user(NewUser::new("a@b.com", Role::User)).await else {
            panic!("create failed");
        };
        assert_eq!(created.bookmarked_events_count, 0);
        assert_eq!(created.tickets_purchased_count, 0);
        assert!(!created.id.as_str().is_empty());

        assert_eq!(store.user().await, Some(created));
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn create_user_failure_propagates_and_keeps_state() {
        let (store, repo, _) = make_store();
        repo.set_fail_writes(true);
        let result = store.create_user(NewUser::new("a@b.com", Role::User)).await;
        assert!(matches!(result, Err(StoreError::RemoteWrite(_))));
        assert_eq!(store.user().await, None);
        assert_eq!(repo.calls().create, 1);
    }

    #[tokio::test]
    async fn fetch_user_found_authenticates() {
        let (store, repo, _) = make_store();
        repo.seed(user("a.b@c.com")).await;

        let Ok(Some(found)) = store.fetch_user(&EncodedEmail::encode("a.b@c.com")).await else {
            panic!("expected user");
        };
        assert_eq!(found.email, "a.b@c.com");
        assert_eq!(store.phase().await, SessionPhase::Authenticated);
    }

    #[tokio::test]
    async fn fetch_user_missing_keeps_phase() {
        let (store, _, _) = make_store();
        let result = store.fetch_user(&EncodedEmail::encode("x@y.z")).await;
        assert!(matches!(result, Ok(None)));
        assert_eq!(store.phase().await, SessionPhase::Anonymous);
    }

    #[tokio::test]
    async fn fetch_user_transport_error_propagates() {
        let (store, repo, _) = make_store();
        repo.set_fail_reads(true);
        let result = store.fetch_user(&EncodedEmail::encode("x@y.z")).await;
        assert!(matches!(result, Err(StoreError::RemoteRead(_))));
    }

    #[tokio::test]
    async fn update_without_user_makes_no_remote_call() {
        let (store, repo, storage) = make_store();
        let patch = UserPatch {
            name: Some("Ada".to_string()),
            ..UserPatch::default()
        };

        let result = store.update_user(patch).await;

        assert!(matches!(result, Ok(None)));
        assert_eq!(repo.calls().total(), 0);
        assert_eq!(store.snapshot().await, SessionState::default());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn update_merges_onto_current_user() {
        let (store, repo, _) = make_store();
        let Ok(created) = store.create_user(NewUser::new("a.b@c.com", Role::User)).await else {
            panic!("create failed");
        };

        let patch = UserPatch {
            phone_number: Some("555".to_string()),
            ..UserPatch::default()
        };
        let Ok(Some(updated)) = store.update_user(patch).await else {
            panic!("update failed");
        };

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.phone_number.as_deref(), Some("555"));
        assert_eq!(store.user().await, Some(updated));
        assert_eq!(repo.calls().update, 1);
    }

    #[tokio::test]
    async fn update_failure_propagates() {
        let (store, repo, _) = make_store();
        let _ = store.create_user(NewUser::new("a@b.com", Role::User)).await;
        repo.set_fail_writes(true);
        let result = store.update_user(UserPatch::default()).await;
        assert!(matches!(result, Err(StoreError::RemoteWrite(_))));
    }

    #[tokio::test]
    async fn purchase_ticket_appends_snapshot() {
        let (store, _, _) = make_store();
        let _ = store.create_user(NewUser::new("a@b.com", Role::User)).await;

        let _ = store.purchase_ticket(event("e1")).await;
        let Ok(Some(user)) = store.purchase_ticket(event("e2")).await else {
            panic!("purchase failed");
        };

        assert_eq!(user.tickets_purchased_count, 2);
        let ids: Vec<&str> = user.tickets_purchased.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2"]);
    }

    #[tokio::test]
    async fn purchase_without_user_is_skipped() {
        let (store, repo, _) = make_store();
        assert!(matches!(store.purchase_ticket(event("e1")).await, Ok(None)));
        assert_eq!(repo.calls().total(), 0);
    }

    #[tokio::test]
    async fn login_then_logout_clears_everything() {
        let (store, repo, storage) = make_store();
        let session_id = store.login("token-1", user("a@b.com")).await;

        assert!(store.is_authenticated().await);
        assert_eq!(store.session_id().await, Some(session_id));
        assert_eq!(store.auth_token().await.as_deref(), Some("token-1"));
        assert_eq!(storage.len(), 1);

        store.logout().await;
        assert!(!store.is_authenticated().await);
        assert_eq!(store.user().await, None);
        assert_eq!(store.auth_token().await, None);
        assert_eq!(store.session_id().await, None);
        assert!(storage.is_empty());

        store.logout().await;
        assert_eq!(store.snapshot().await, SessionState::default());
        assert_eq!(repo.calls().total(), 0);
    }

    #[tokio::test]
    async fn each_login_gets_a_new_session_id() {
        let (store, _, _) = make_store();
        let first = store.login("t", user("a@b.com")).await;
        store.logout().await;
        let second = store.login("t", user("a@b.com")).await;
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn session_survives_restart() {
        let (store, repo, storage) = make_store();
        let session_id = store.login("token-1", user("a@b.com")).await;

        let restarted = SessionStore::new(repo, storage, "user-state");
        assert!(restarted.hydrate().await);
        assert!(restarted.is_authenticated().await);
        assert_eq!(restarted.session_id().await, Some(session_id));
    }

    #[tokio::test]
    async fn clear_storage_keeps_memory() {
        let (store, _, storage) = make_store();
        store.login("t", user("a@b.com")).await;
        store.clear_storage().await;
        assert!(storage.is_empty());
        assert!(store.is_authenticated().await);
    }

    #[tokio::test]
    async fn set_user_and_session_id() {
        let (store, _, _) = make_store();
        store.set_user(user("a@b.com")).await;
        assert!(store.is_authenticated().await);

        let id = SessionId::from_string("sess_provider_1");
        store.set_session_id(id.clone()).await;
        assert_eq!(store.session_id().await, Some(id));
    }

    #[tokio::test]
    async fn storage_outage_does_not_fail_login() {
        let (store, _, storage) = make_store();
        storage.set_failing(true);
        store.login("t", user("a@b.com")).await;
        store.logout().await;
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn subscribers_observe_transitions() {
        let (store, _, _) = make_store();
        let mut rx = store.subscribe();
        store.logout().await;
        let Ok(action) = rx.recv().await else {
            panic!("expected action");
        };
        assert_eq!(action, SessionAction::LoggedOut);
    }
}
