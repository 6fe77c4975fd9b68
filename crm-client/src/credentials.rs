//! Persistence of the bearer credential.
//!
//! The gateway reads the credential before every request and clears it on a
//! 401; the session manager writes it on login and clears it on logout. Both
//! hold the same `Arc<dyn CredentialStore>`.

use std::fmt;
use std::sync::{Arc, Mutex};

/// Errors raised by a credential backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("credential storage unavailable: {0}")]
    Unavailable(String),
    #[error("credential storage failed: {0}")]
    Storage(String),
}

/// A single persisted bearer token.
pub trait CredentialStore: fmt::Debug + Send + Sync {
    fn load(&self) -> Result<Option<String>, CredentialError>;

    fn save(&self, token: &str) -> Result<(), CredentialError>;

    fn clear(&self) -> Result<(), CredentialError>;

    /// Clear the credential only while it still equals `expected`.
    ///
    /// Returns `true` when the credential was removed. A response to a request
    /// that carried an older token must not erase a token saved since.
    fn clear_if(&self, expected: &str) -> Result<bool, CredentialError> {
        match self.load()? {
            Some(current) if current == expected => {
                self.clear()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Process-local credential store, used natively and in tests.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    #[must_use]
    pub fn shared() -> Arc<dyn CredentialStore> {
        Arc::new(Self::new())
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, CredentialError> {
        self.token
            .lock()
            .map_err(|_| CredentialError::Unavailable("credential lock poisoned".to_string()))
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<String>, CredentialError> {
        Ok(self.guard()?.clone())
    }

    fn save(&self, token: &str) -> Result<(), CredentialError> {
        *self.guard()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        *self.guard()? = None;
        Ok(())
    }

    fn clear_if(&self, expected: &str) -> Result<bool, CredentialError> {
        let mut guard = self.guard()?;
        if guard.as_deref() == Some(expected) {
            *guard = None;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
