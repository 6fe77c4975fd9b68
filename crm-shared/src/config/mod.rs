//! # Configuration
//!
//! Settings for the browser client: where the backend lives, how long a
//! request may take, and under which key the bearer credential is persisted.

use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_CREDENTIAL_KEY: &str = "token";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_API_URL: &str = "CRM_API_URL";
pub const ENV_CREDENTIAL_KEY: &str = "CRM_CREDENTIAL_KEY";
pub const ENV_TIMEOUT_SECS: &str = "CRM_REQUEST_TIMEOUT_SECS";
pub const ENV_LOGOUT_PATH: &str = "CRM_LOGOUT_PATH";

/// Errors raised while resolving configuration overrides.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {key} value '{value}': must be a whole number of seconds greater than 0")]
    InvalidTimeout { key: &'static str, value: String },
    #[error("Invalid {key} value: must not be empty")]
    Empty { key: &'static str },
}

/// Client configuration shared by the gateway, the session manager and the
/// browser credential store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to, without a trailing slash
    pub api_base_url: String,

    /// Per-request timeout. Only enforced off the browser, where the fetch
    /// API offers no timeout.
    pub request_timeout_secs: u64,

    /// `localStorage` key of the bearer credential
    pub credential_key: String,

    /// Endpoint notified on logout. The backend has none by default.
    pub logout_path: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            credential_key: DEFAULT_CREDENTIAL_KEY.to_string(),
            logout_path: None,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `CRM_*` keys.
    ///
    /// The browser build passes values captured with `option_env!`; tests pass
    /// a closure over a map.
    pub fn from_env_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            let url = url.trim().trim_end_matches('/');
            if url.is_empty() {
                return Err(ConfigError::Empty { key: ENV_API_URL });
            }
            config.api_base_url = url.to_string();
        }
        if let Some(key) = lookup(ENV_CREDENTIAL_KEY) {
            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigError::Empty {
                    key: ENV_CREDENTIAL_KEY,
                });
            }
            config.credential_key = key.to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.request_timeout_secs = match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        key: ENV_TIMEOUT_SECS,
                        value: raw,
                    });
                }
            };
        }
        if let Some(path) = lookup(ENV_LOGOUT_PATH) {
            let path = path.trim();
            config.logout_path = (!path.is_empty()).then(|| path.to_string());
        }

        Ok(config)
    }

    /// Absolute URL of an endpoint path such as `/customers`.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        if path.is_empty() {
            base.to_string()
        } else if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_with_defaults() {
        let config = ClientConfig::default();

        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.credential_key, "token");
        assert!(config.logout_path.is_none());
    }

    #[test]
    fn test_empty_environment_keeps_defaults() {
        let config = ClientConfig::from_env_with(|_| None).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_environment_overrides() {
        let config = ClientConfig::from_env_with(lookup_from(&[
            ("CRM_API_URL", "https://crm.example.com/api/"),
            ("CRM_CREDENTIAL_KEY", "crm-token"),
            ("CRM_REQUEST_TIMEOUT_SECS", "30"),
            ("CRM_LOGOUT_PATH", "/auth/logout"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "https://crm.example.com/api");
        assert_eq!(config.credential_key, "crm-token");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.logout_path.as_deref(), Some("/auth/logout"));
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        for raw in ["0", "soon", "-5"] {
            let err =
                ClientConfig::from_env_with(lookup_from(&[("CRM_REQUEST_TIMEOUT_SECS", raw)]))
                    .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
        }
    }

    #[test]
    fn test_blank_values() {
        let err = ClientConfig::from_env_with(lookup_from(&[("CRM_API_URL", "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Empty { key: "CRM_API_URL" });

        let config =
            ClientConfig::from_env_with(lookup_from(&[("CRM_LOGOUT_PATH", "")])).unwrap();
        assert!(config.logout_path.is_none());
    }

    #[test]
    fn test_api_url_joins_paths() {
        let config = ClientConfig::default();

        assert_eq!(config.api_url("/customers"), "http://localhost:8080/api/customers");
        assert_eq!(config.api_url("users/me"), "http://localhost:8080/api/users/me");
        assert_eq!(config.api_url(""), "http://localhost:8080/api");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"api_base_url": "http://10.0.0.5:9000/api"}"#).unwrap();

        assert_eq!(config.api_base_url, "http://10.0.0.5:9000/api");
        assert_eq!(config.credential_key, "token");
        assert_eq!(config.request_timeout_secs, 10);
    }
}
