//! Long-lived handles shared by every page: the gateway and the session
//! manager, both bound to the browser credential store.

use client::{ApiClient, ApiError, CredentialStore, SessionManager, SessionState};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use yewdux::Dispatch;

use crate::config::FrontendConfig;
use crate::credentials::BrowserCredentialStore;

const LOGIN_PATH: &str = "/login";

struct Inner {
    api: ApiClient,
    session: SessionManager,
}

#[derive(Clone)]
pub struct Services {
    inner: Rc<Inner>,
}

impl Services {
    pub fn new(config: &FrontendConfig, session: Dispatch<SessionState>) -> Result<Self, ApiError> {
        let credentials: Arc<dyn CredentialStore> =
            Arc::new(BrowserCredentialStore::new(config.client.credential_key.clone()));
        let api = ApiClient::new(config.client.clone(), credentials)?;
        // Registered after the session manager's hook, so the session is
        // already reset when the page leaves.
        let session = SessionManager::new(api.clone(), session);
        api.on_unauthorized(redirect_to_login);

        Ok(Self {
            inner: Rc::new(Inner { api, session }),
        })
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub fn session(&self) -> &SessionManager {
        &self.inner.session
    }
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("api", &self.inner.api)
            .finish_non_exhaustive()
    }
}

/// Full navigation to the login page, unless already there.
fn redirect_to_login() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    if location.pathname().is_ok_and(|path| path == LOGIN_PATH) {
        return;
    }
    log::info!("session expired, returning to login");
    if let Err(err) = location.set_href(LOGIN_PATH) {
        log::error!("could not navigate to login: {err:?}");
    }
}
