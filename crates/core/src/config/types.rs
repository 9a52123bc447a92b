use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::orchestrator::SearchConfig;
use crate::provider::ProviderConfig;
use crate::watcher::WatcherConfig;
use crate::worker::WorkerConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub worker: WorkerConfig,
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    #[serde(default)]
    pub watcher: WatcherConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the map front-end, served for unmatched paths.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    5000
}

/// Artifact storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtifactsConfig {
    /// Directory holding scratch and per-category result files.
    #[serde(default = "default_artifacts_dir")]
    pub dir: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: default_artifacts_dir(),
        }
    }
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub provider: SanitizedProviderConfig,
    pub worker: WorkerConfig,
    pub artifacts: ArtifactsConfig,
    pub watcher: WatcherConfig,
    pub search: SearchConfig,
}

/// Sanitized provider config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedProviderConfig {
    pub api_key_configured: bool,
    pub api_key_env: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            provider: SanitizedProviderConfig {
                api_key_configured: !config.provider.api_key.is_empty(),
                api_key_env: config.provider.api_key_env.clone(),
                base_url: config.provider.base_url.clone(),
                timeout_secs: config.provider.timeout_secs,
            },
            worker: config.worker.clone(),
            artifacts: config.artifacts.clone(),
            watcher: config.watcher.clone(),
            search: config.search.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_config() {
        let toml = r#"
[provider]
api_key = "secret"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.provider.api_key, "secret");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.artifacts.dir, PathBuf::from("data"));
        assert_eq!(config.watcher.poll_interval_ms, 500);
        assert_eq!(config.watcher.budget_ms, 5000);
        assert_eq!(config.search.categories, vec!["restaurant", "hotel"]);
    }

    #[test]
    fn test_deserialize_empty_config_leaves_key_blank() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.provider.api_key.is_empty());
        assert_eq!(config.provider.api_key_env, "SERPAPI_KEY");
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000
static_dir = "web"

[provider]
api_key = "secret"
timeout_secs = 10

[worker]
program = "/usr/local/bin/nearby-fetch"
args = ["--verbose"]

[artifacts]
dir = "/var/lib/nearby"

[watcher]
poll_interval_ms = 250
budget_ms = 2000

[search]
categories = ["restaurant", "hotel", "cafe"]
default_category = "cafe"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.static_dir, Some(PathBuf::from("web")));
        assert_eq!(config.provider.timeout_secs, 10);
        assert_eq!(
            config.worker.program,
            PathBuf::from("/usr/local/bin/nearby-fetch")
        );
        assert_eq!(config.worker.args, vec!["--verbose"]);
        assert_eq!(config.artifacts.dir, PathBuf::from("/var/lib/nearby"));
        assert_eq!(config.watcher.poll_interval_ms, 250);
        assert_eq!(config.search.categories.len(), 3);
        assert_eq!(config.search.default_category, "cafe");
    }

    #[test]
    fn test_sanitized_config_hides_api_key() {
        let config: Config = toml::from_str(
            r#"
[provider]
api_key = "very-secret"
"#,
        )
        .unwrap();

        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.provider.api_key_configured);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("very-secret"));
    }
}
