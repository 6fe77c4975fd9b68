//! HTTP gateway to the CRM backend.
//!
//! Every request goes through [`ApiClient::execute`], which attaches the
//! persisted bearer credential and turns a 401 into a forced logout: the
//! credential is cleared (only if it is still the one that was sent) and the
//! registered unauthorized hooks run.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::config::ClientConfig;
use shared::models::ErrorResponse;
use shared::validation::ValidationErrors;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::credentials::{CredentialError, CredentialStore};

/// Errors surfaced by gateway calls and the operations built on them.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("not authenticated")]
    Unauthorized { message: Option<String> },

    #[error("request failed with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

impl ApiError {
    /// Message the server put in its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message } | Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text for the UI: the server's message, or `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED.as_u16()),
            Self::Status { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Field errors when the input never left the client.
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Handle returned by [`ApiClient::on_unauthorized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookId(u64);

type UnauthorizedHook = Rc<dyn Fn()>;

#[derive(Default)]
struct Hooks {
    next_id: Cell<u64>,
    registered: RefCell<Vec<(HookId, UnauthorizedHook)>>,
}

/// Gateway shared by the session manager and every store.
///
/// Cloning is cheap; clones share the credential store and the hook list.
#[derive(Clone)]
pub struct ApiClient {
    config: Rc<ClientConfig>,
    client: Client,
    credentials: Arc<dyn CredentialStore>,
    hooks: Rc<Hooks>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.api_base_url)
            .field("credentials", &self.credentials)
            .field("hooks", &self.hooks.registered.borrow().len())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(
        config: ClientConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, ApiError> {
        let builder = Client::builder();
        // The fetch backend has no request timeout.
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_secs(config.request_timeout_secs));
        let client = builder.build()?;

        Ok(Self {
            config: Rc::new(config),
            client,
            credentials,
            hooks: Rc::new(Hooks::default()),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Register a callback run after a 401 cleared the credential.
    pub fn on_unauthorized(&self, hook: impl Fn() + 'static) -> HookId {
        let id = HookId(self.hooks.next_id.get());
        self.hooks.next_id.set(id.0 + 1);
        self.hooks
            .registered
            .borrow_mut()
            .push((id, Rc::new(hook)));
        id
    }

    pub fn remove_hook(&self, id: HookId) {
        self.hooks
            .registered
            .borrow_mut()
            .retain(|(registered, _)| *registered != id);
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.config.api_url(path))
    }

    /// Attach the credential, send, and map the response status.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let token = self.credentials.load()?;
        let request = match &token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url().path(), "response received");

        if status == StatusCode::UNAUTHORIZED {
            let message = error_message(response).await;
            self.expire(token.as_deref());
            return Err(ApiError::Unauthorized { message });
        }
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    fn expire(&self, sent: Option<&str>) {
        let Some(sent) = sent else {
            debug!("401 for an anonymous request");
            return;
        };
        match self.credentials.clear_if(sent) {
            Ok(true) => {
                info!("credential rejected by server, session expired");
                // Hooks may register or remove hooks themselves.
                let hooks: Vec<UnauthorizedHook> = self
                    .hooks
                    .registered
                    .borrow()
                    .iter()
                    .map(|(_, hook)| Rc::clone(hook))
                    .collect();
                for hook in hooks {
                    hook();
                }
            }
            Ok(false) => debug!("401 carried a superseded credential, ignoring"),
            Err(err) => warn!(error = %err, "could not clear rejected credential"),
        }
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.execute(request).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.json(self.request(Method::GET, path)).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        self.json(self.request(Method::GET, path).query(query)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.json(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.json(self.request(Method::PUT, path).json(body)).await
    }

    /// `PUT` carrying its arguments in the query string and no body.
    pub async fn put_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        self.json(self.request(Method::PUT, path).query(query)).await
    }

    /// `POST` without a body whose response body is ignored.
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.request(Method::POST, path)).await?;
        Ok(())
    }

    /// `DELETE`; the server answers with an empty body.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}

async fn error_message(response: Response) -> Option<String> {
    let body = response.text().await.ok()?;
    ErrorResponse::message_from_body(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::MemoryCredentialStore;
    use shared::validation::ValidationError;

    fn client(token: Option<&str>) -> (ApiClient, Arc<dyn CredentialStore>) {
        let store: Arc<dyn CredentialStore> = match token {
            Some(token) => Arc::new(MemoryCredentialStore::with_token(token)),
            None => MemoryCredentialStore::shared(),
        };
        let api = ApiClient::new(ClientConfig::default(), Arc::clone(&store)).unwrap();
        (api, store)
    }

    #[test]
    fn user_message_prefers_server_text() {
        let err = ApiError::Status {
            status: 409,
            message: Some("Email already registered".to_string()),
        };
        assert_eq!(err.user_message("Registration failed"), "Email already registered");
        assert_eq!(err.status(), Some(409));

        let err = ApiError::Unauthorized { message: None };
        assert_eq!(err.user_message("Login failed"), "Login failed");
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn validation_errors_carry_no_server_message() {
        let mut errors = ValidationErrors::new();
        errors.check("email", Err(ValidationError::Required));
        let err = ApiError::from(errors);

        assert!(err.server_message().is_none());
        assert_eq!(
            err.validation().and_then(|e| e.get("email")),
            Some(&ValidationError::Required)
        );
    }

    #[test]
    fn expire_clears_matching_credential_and_runs_hooks() {
        let (api, store) = client(Some("t1"));
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        api.on_unauthorized(move || counter.set(counter.get() + 1));

        api.expire(Some("t1"));

        assert_eq!(fired.get(), 1);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn expire_ignores_superseded_and_anonymous_requests() {
        let (api, store) = client(Some("t2"));
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        api.on_unauthorized(move || counter.set(counter.get() + 1));

        api.expire(Some("t1"));
        api.expire(None);

        assert_eq!(fired.get(), 0);
        assert_eq!(store.load().unwrap().as_deref(), Some("t2"));
    }

    #[test]
    fn removed_hooks_do_not_run() {
        let (api, _store) = client(Some("t1"));
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let id = api.on_unauthorized(move || flag.set(true));
        api.remove_hook(id);

        api.expire(Some("t1"));

        assert!(!fired.get());
    }

    #[test]
    fn clones_share_hooks() {
        let (api, _store) = client(Some("t1"));
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        api.clone().on_unauthorized(move || flag.set(true));

        api.expire(Some("t1"));

        assert!(fired.get());
    }
}
