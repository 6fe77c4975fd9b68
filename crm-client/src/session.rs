//! Authentication state and the operations that change it.

use serde::Serialize;
use shared::models::{AuthResponse, LoginRequest, RegisterRequest, User};
use shared::validation::{validate_login, validate_registration};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info, warn};
use yewdux::{Dispatch, Reducer, Store};

use crate::api::{ApiClient, ApiError};

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// Who is signed in, if anyone.
#[derive(Debug, Default, Clone, PartialEq, Store)]
pub struct SessionState {
    pub authenticated: bool,
    pub user: Option<User>,
    pub loading: bool,
    pub last_error: Option<String>,
}

impl SessionState {
    pub fn is_admin(&self) -> bool {
        self.authenticated && self.user.as_ref().is_some_and(User::is_admin)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// A login, registration or resolution is in flight.
    Started,
    Authenticated(User),
    Failed(String),
    /// Nothing to resolve.
    Settled,
    ClearError,
    /// Back to the signed-out initial state.
    Reset,
}

impl Reducer<SessionState> for SessionAction {
    fn apply(self, mut state: Rc<SessionState>) -> Rc<SessionState> {
        let session = Rc::make_mut(&mut state);
        match self {
            Self::Started => {
                session.loading = true;
                session.last_error = None;
            }
            Self::Authenticated(user) => {
                session.authenticated = true;
                session.user = Some(user);
                session.loading = false;
                session.last_error = None;
            }
            Self::Failed(message) => {
                session.authenticated = false;
                session.user = None;
                session.loading = false;
                session.last_error = Some(message);
            }
            Self::Settled => session.loading = false,
            Self::ClearError => session.last_error = None,
            Self::Reset => *session = SessionState::default(),
        }
        state
    }
}

/// Drives [`SessionState`] through the authentication endpoints.
#[derive(Clone)]
pub struct SessionManager {
    api: ApiClient,
    dispatch: Dispatch<SessionState>,
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("api", &self.api)
            .field("state", &self.dispatch.get())
            .finish()
    }
}

impl SessionManager {
    /// Creates the manager and subscribes it to the gateway's 401 handling,
    /// so a rejected credential resets the session whichever store sent the
    /// request.
    pub fn new(api: ApiClient, dispatch: Dispatch<SessionState>) -> Self {
        let expired = dispatch.clone();
        api.on_unauthorized(move || expired.apply(SessionAction::Reset));
        Self { api, dispatch }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn state(&self) -> Rc<SessionState> {
        self.dispatch.get()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        validate_login(&request)?;

        self.dispatch.apply(SessionAction::Started);
        let result = self.authenticate("/auth/login", &request).await;
        self.finish(result, LOGIN_FAILED)
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<User, ApiError> {
        let request = RegisterRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
            display_name: display_name.trim().to_string(),
        };
        validate_registration(&request)?;

        self.dispatch.apply(SessionAction::Started);
        let result = self.authenticate("/auth/register", &request).await;
        self.finish(result, REGISTRATION_FAILED)
    }

    /// Restore the session from a persisted credential.
    ///
    /// Failures are silent: the credential is dropped and the session stays
    /// signed out without an error message.
    pub async fn resolve_current_session(&self) -> Option<User> {
        let token = match self.api.credentials().load() {
            Ok(Some(token)) => token,
            Ok(None) => {
                self.dispatch.apply(SessionAction::Settled);
                return None;
            }
            Err(err) => {
                warn!(error = %err, "could not read persisted credential");
                self.dispatch.apply(SessionAction::Settled);
                return None;
            }
        };

        self.dispatch.apply(SessionAction::Started);
        match self.api.get::<User>("/users/me").await {
            Ok(user) => {
                info!(user_id = user.id, "session restored");
                self.dispatch.apply(SessionAction::Authenticated(user.clone()));
                Some(user)
            }
            Err(err) => {
                debug!(error = %err, "persisted credential could not be resolved");
                if let Err(err) = self.api.credentials().clear_if(&token) {
                    warn!(error = %err, "could not clear persisted credential");
                }
                self.dispatch.apply(SessionAction::Reset);
                None
            }
        }
    }

    /// Sign out locally. Safe to call any number of times.
    pub async fn logout(&self) {
        let has_credential = matches!(self.api.credentials().load(), Ok(Some(_)));
        if let (true, Some(path)) = (has_credential, self.api.config().logout_path.clone()) {
            if let Err(err) = self.api.post_empty(&path).await {
                debug!(error = %err, "logout notification failed");
            }
        }

        if let Err(err) = self.api.credentials().clear() {
            warn!(error = %err, "could not clear persisted credential");
        }
        self.dispatch.apply(SessionAction::Reset);
        info!("signed out");
    }

    pub fn clear_error(&self) {
        self.dispatch.apply(SessionAction::ClearError);
    }

    async fn authenticate<B: Serialize>(&self, path: &str, body: &B) -> Result<User, ApiError> {
        let AuthResponse { token } = self.api.post(path, body).await?;
        self.api.credentials().save(&token)?;

        match self.api.get::<User>("/users/me").await {
            Ok(user) => Ok(user),
            Err(err) => {
                if let Err(clear_err) = self.api.credentials().clear_if(&token) {
                    warn!(error = %clear_err, "could not clear credential after failed profile fetch");
                }
                Err(err)
            }
        }
    }

    fn finish(&self, result: Result<User, ApiError>, fallback: &str) -> Result<User, ApiError> {
        match result {
            Ok(user) => {
                info!(user_id = user.id, role = %user.role, "signed in");
                self.dispatch.apply(SessionAction::Authenticated(user.clone()));
                Ok(user)
            }
            Err(err) => {
                warn!(error = %err, "authentication failed");
                self.dispatch
                    .apply(SessionAction::Failed(err.user_message(fallback)));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::UserRole;
    use yewdux::Context;

    fn user(role: UserRole) -> User {
        User {
            id: 1,
            email: "ayse@example.com".to_string(),
            display_name: "Ayse".to_string(),
            role,
        }
    }

    fn dispatch() -> Dispatch<SessionState> {
        Dispatch::new(&Context::new())
    }

    #[test]
    fn initial_state_is_signed_out() {
        let state = dispatch().get();
        assert!(!state.authenticated);
        assert!(state.user.is_none());
        assert!(!state.loading);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn started_then_authenticated() {
        let dispatch = dispatch();
        dispatch.apply(SessionAction::Failed("old".to_string()));
        dispatch.apply(SessionAction::Started);
        assert!(dispatch.get().loading);
        assert!(dispatch.get().last_error.is_none());

        dispatch.apply(SessionAction::Authenticated(user(UserRole::Admin)));
        let state = dispatch.get();
        assert!(state.authenticated);
        assert!(!state.loading);
        assert!(state.is_admin());
    }

    #[test]
    fn failure_keeps_session_signed_out() {
        let dispatch = dispatch();
        dispatch.apply(SessionAction::Started);
        dispatch.apply(SessionAction::Failed(LOGIN_FAILED.to_string()));

        let state = dispatch.get();
        assert!(!state.authenticated);
        assert!(!state.loading);
        assert_eq!(state.last_error.as_deref(), Some(LOGIN_FAILED));
    }

    #[test]
    fn clear_error_only_touches_error() {
        let dispatch = dispatch();
        dispatch.apply(SessionAction::Authenticated(user(UserRole::User)));
        dispatch.apply(SessionAction::Failed("x".to_string()));
        dispatch.apply(SessionAction::Authenticated(user(UserRole::User)));
        dispatch.apply(SessionAction::ClearError);

        let state = dispatch.get();
        assert!(state.authenticated);
        assert!(!state.is_admin());
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let dispatch = dispatch();
        dispatch.apply(SessionAction::Authenticated(user(UserRole::Manager)));
        dispatch.apply(SessionAction::Reset);
        dispatch.apply(SessionAction::Reset);

        assert_eq!(*dispatch.get(), SessionState::default());
    }
}
