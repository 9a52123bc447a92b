//! Provider configuration.

use serde::{Deserialize, Serialize};

/// Endpoint override handed to the worker.
pub const BASE_URL_ENV: &str = "SERPAPI_BASE_URL";

/// Request timeout (seconds) handed to the worker.
pub const TIMEOUT_ENV: &str = "SERPAPI_TIMEOUT_SECS";

/// Credentials and endpoint for the place-search provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider API key. Required; startup fails without it.
    #[serde(default)]
    pub api_key: String,

    /// Environment variable the key is handed to the worker through.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Search endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds, applied by the worker's HTTP client.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_key_env() -> String {
    "SERPAPI_KEY".to_string()
}

fn default_base_url() -> String {
    "https://serpapi.com/search.json".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ProviderConfig {
    /// Creates a config with the given key and default endpoint.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Sets the search endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Environment a worker process needs to reach the provider.
    pub fn worker_env(&self) -> Vec<(String, String)> {
        vec![
            (self.api_key_env.clone(), self.api_key.clone()),
            (BASE_URL_ENV.to_string(), self.base_url.clone()),
            (TIMEOUT_ENV.to_string(), self.timeout_secs.to_string()),
        ]
    }

    /// Worker-side counterpart of [`worker_env`](Self::worker_env).
    ///
    /// Unset or unparsable overrides fall back to the defaults; a missing
    /// key is left empty for [`SerpApiClient::new`](super::SerpApiClient::new)
    /// to reject.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        Self {
            api_key: var(&defaults.api_key_env).unwrap_or_default(),
            base_url: var(BASE_URL_ENV).unwrap_or(defaults.base_url),
            timeout_secs: var(TIMEOUT_ENV)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.timeout_secs),
            api_key_env: defaults.api_key_env,
        }
    }
}
