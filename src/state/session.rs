//! Session state: who is logged in and what is known about them.

use serde::{Deserialize, Serialize};

use super::Reducer;
use crate::domain::{SessionId, User};

/// Persisted session slice.
///
/// Serialized as `{ user, authToken, isAuthenticated, sessionId }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Currently loaded user record.
    pub user: Option<User>,
    /// Token issued by the authentication provider.
    pub auth_token: Option<String>,
    /// Whether a user is signed in.
    pub is_authenticated: bool,
    /// Identifier of the current login session.
    pub session_id: Option<SessionId>,
}

/// The two session phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nobody is signed in. Initial phase.
    Anonymous,
    /// A user is signed in.
    Authenticated,
}

impl SessionState {
    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        if self.is_authenticated {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        }
    }
}

/// Transitions of the session state.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// A record was created remotely. Adopts it without authenticating.
    UserCreated(User),
    /// A record was adopted directly and the session marked authenticated.
    UserSet(User),
    /// A lookup found the record. Adopts it and authenticates.
    UserFetched(User),
    /// The loaded record was updated remotely.
    UserUpdated(User),
    /// Sign-in completed.
    LoggedIn {
        /// Token from the authentication provider.
        auth_token: String,
        /// The signed-in user.
        user: User,
        /// Freshly generated session id.
        session_id: SessionId,
    },
    /// Session id replaced.
    SessionIdAssigned(SessionId),
    /// Every session field cleared.
    LoggedOut,
}

/// Reducer for [`SessionState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Action = SessionAction;

    fn reduce(state: &mut SessionState, action: &SessionAction) {
        match action {
            SessionAction::UserCreated(user) | SessionAction::UserUpdated(user) => {
                state.user = Some(user.clone());
            }
            SessionAction::UserSet(user) | SessionAction::UserFetched(user) => {
                state.user = Some(user.clone());
                state.is_authenticated = true;
            }
            SessionAction::LoggedIn {
                auth_token,
                user,
                session_id,
            } => {
                state.user = Some(user.clone());
                state.auth_token = Some(auth_token.clone());
                state.is_authenticated = true;
                state.session_id = Some(session_id.clone());
            }
            SessionAction::SessionIdAssigned(session_id) => {
                state.session_id = Some(session_id.clone());
            }
            SessionAction::LoggedOut => *state = SessionState::default(),
        }
    }

    fn normalize(state: &mut SessionState) {
        if let Some(user) = state.user.as_mut() {
            user.sync_counts();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::fixtures::user;

    fn apply(state: &mut SessionState, action: SessionAction) {
        SessionReducer::reduce(state, &action);
    }

    #[test]
    fn starts_anonymous() {
        assert_eq!(SessionState::default().phase(), SessionPhase::Anonymous);
    }

    #[test]
    fn login_then_logout_round_trips_phase() {
        let mut state = SessionState::default();
        apply(
            &mut state,
            SessionAction::LoggedIn {
                auth_token: "tok".to_string(),
                user: user("a@b.com"),
                session_id: SessionId::generate(),
            },
        );
        assert_eq!(state.phase(), SessionPhase::Authenticated);
        assert_eq!(state.auth_token.as_deref(), Some("tok"));
        assert!(state.session_id.is_some());

        apply(&mut state, SessionAction::LoggedOut);
        assert_eq!(state, SessionState::default());

        apply(&mut state, SessionAction::LoggedOut);
        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn created_user_is_not_authenticated() {
        let mut state = SessionState::default();
        apply(&mut state, SessionAction::UserCreated(user("a@b.com")));
        assert!(state.user.is_some());
        assert_eq!(state.phase(), SessionPhase::Anonymous);
    }

    #[test]
    fn fetched_user_authenticates() {
        let mut state = SessionState::default();
        apply(&mut state, SessionAction::UserFetched(user("a@b.com")));
        assert_eq!(state.phase(), SessionPhase::Authenticated);
        assert!(state.auth_token.is_none());
    }

    #[test]
    fn update_keeps_token_and_session() {
        let mut state = SessionState::default();
        let session_id = SessionId::generate();
        apply(
            &mut state,
            SessionAction::LoggedIn {
                auth_token: "tok".to_string(),
                user: user("a@b.com"),
                session_id: session_id.clone(),
            },
        );
        let mut updated = user("a@b.com");
        updated.name = Some("Ada".to_string());
        apply(&mut state, SessionAction::UserUpdated(updated));

        assert_eq!(state.session_id, Some(session_id));
        assert_eq!(state.auth_token.as_deref(), Some("tok"));
        assert_eq!(
            state.user.as_ref().and_then(|u| u.name.as_deref()),
            Some("Ada")
        );
    }

    #[test]
    fn persisted_slice_uses_camel_case() {
        let state = SessionState::default();
        let value = serde_json::to_value(&state).unwrap_or_default();
        assert_eq!(value["isAuthenticated"], false);
        assert!(value["authToken"].is_null());
        assert!(value["sessionId"].is_null());
        assert!(value["user"].is_null());
    }
}
