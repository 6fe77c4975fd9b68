use client::{CredentialError, CredentialStore};
use gloo_storage::{LocalStorage, Storage};

/// Bearer credential persisted in `localStorage` under a single key.
///
/// The value is the bare token string, not JSON, so a token written by any
/// other client under the same key reads back unchanged.
#[derive(Debug, Clone)]
pub struct BrowserCredentialStore {
    key: String,
}

impl BrowserCredentialStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl CredentialStore for BrowserCredentialStore {
    fn load(&self) -> Result<Option<String>, CredentialError> {
        let token = LocalStorage::raw()
            .get_item(&self.key)
            .map_err(|err| CredentialError::Unavailable(format!("{err:?}")))?;
        Ok(token.filter(|token| !token.is_empty()))
    }

    fn save(&self, token: &str) -> Result<(), CredentialError> {
        LocalStorage::raw()
            .set_item(&self.key, token)
            .map_err(|err| CredentialError::Storage(format!("{err:?}")))
    }

    fn clear(&self) -> Result<(), CredentialError> {
        LocalStorage::delete(&self.key);
        Ok(())
    }
}
