use super::{types::Config, ConfigError};
use crate::artifact::ArtifactName;
use crate::place::Category;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Provider credential is present
/// - Watcher interval and budget are usable
/// - Search categories map to valid artifact names
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.provider.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "provider.api_key is required (set it in the config file or via {})",
            config.provider.api_key_env
        )));
    }

    if config.watcher.poll_interval_ms == 0 || config.watcher.budget_ms == 0 {
        return Err(ConfigError::ValidationError(
            "watcher.poll_interval_ms and watcher.budget_ms must be positive".to_string(),
        ));
    }

    if config.watcher.poll_interval_ms > config.watcher.budget_ms {
        return Err(ConfigError::ValidationError(format!(
            "watcher.poll_interval_ms ({}) exceeds watcher.budget_ms ({})",
            config.watcher.poll_interval_ms, config.watcher.budget_ms
        )));
    }

    if config.search.categories.is_empty() {
        return Err(ConfigError::ValidationError(
            "search.categories cannot be empty".to_string(),
        ));
    }

    for name in &config.search.categories {
        let category = Category::new(name)
            .map_err(|e| ConfigError::ValidationError(format!("search.categories: {}", e)))?;
        ArtifactName::durable(&category)
            .map_err(|e| ConfigError::ValidationError(format!("search.categories: {}", e)))?;
    }

    Category::new(&config.search.default_category)
        .map_err(|e| ConfigError::ValidationError(format!("search.default_category: {}", e)))?;

    Ok(())
}
