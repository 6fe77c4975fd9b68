//! Frontend configuration module
//!
//! Values are baked in at compile time from the same `CRM_*` variables the
//! client crate reads at runtime.

use shared::config::{
    ClientConfig, ENV_API_URL, ENV_CREDENTIAL_KEY, ENV_LOGOUT_PATH, ENV_TIMEOUT_SECS,
};

/// Frontend configuration resolved from build-time environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendConfig {
    pub client: ClientConfig,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self::from_lookup(build_env)
    }
}

impl FrontendConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalid overrides fall back to the defaults rather than aborting
    /// start-up.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let client = ClientConfig::from_env_with(lookup).unwrap_or_else(|err| {
            log::warn!("ignoring invalid build configuration: {err}");
            ClientConfig::default()
        });
        Self { client }
    }
}

fn build_env(key: &str) -> Option<String> {
    let value = match key {
        ENV_API_URL => option_env!("CRM_API_URL"),
        ENV_CREDENTIAL_KEY => option_env!("CRM_CREDENTIAL_KEY"),
        ENV_TIMEOUT_SECS => option_env!("CRM_REQUEST_TIMEOUT_SECS"),
        ENV_LOGOUT_PATH => option_env!("CRM_LOGOUT_PATH"),
        _ => None,
    };
    value.map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontend_config_uses_lookup() {
        let config = FrontendConfig::from_lookup(|key| {
            (key == "CRM_API_URL").then(|| "https://crm.example.com/api".to_string())
        });
        assert_eq!(config.client.api_base_url, "https://crm.example.com/api");
        assert_eq!(config.client.credential_key, "token");
    }

    #[test]
    fn test_invalid_override_falls_back_to_defaults() {
        let config = FrontendConfig::from_lookup(|key| {
            (key == "CRM_REQUEST_TIMEOUT_SECS").then(|| "never".to_string())
        });
        assert_eq!(config.client, ClientConfig::default());
    }

    #[test]
    fn test_unknown_keys_are_absent() {
        assert_eq!(build_env("CRM_SOMETHING_ELSE"), None);
    }
}
