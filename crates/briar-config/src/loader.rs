//! Configuration loader with layered sources.

use crate::AppConfig;
use briar_core::BriarError;
use config::{Config, Environment, File};
use std::path::Path;
use tracing::{debug, info};

/// Loads configuration from layered sources.
///
/// Sources are merged in order:
/// 1. `config/default.toml` — default values
/// 2. `config/{environment}.toml` — environment-specific overrides
/// 3. `config/local.toml` — local overrides, not under version control
/// 4. Environment variables with the `BRIAR__` prefix
pub struct ConfigLoader {
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a loader reading from the given directory.
    #[must_use]
    pub fn new(config_dir: impl Into<String>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Creates a loader for the default location (`./config`).
    #[must_use]
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    /// Loads and validates the configuration.
    pub fn load(&self) -> Result<AppConfig, BriarError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file loaded: {}", e);
        }

        let environment =
            std::env::var("BRIAR_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", self.config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config file: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("BRIAR")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder
            .build()
            .map_err(|e| BriarError::Configuration(e.to_string()))?
            .try_deserialize()
            .map_err(|e| BriarError::Configuration(e.to_string()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn validate(config: &AppConfig) -> Result<(), BriarError> {
        if config.database.url.is_empty() {
            return Err(BriarError::Configuration(
                "database.url must not be empty".to_string(),
            ));
        }
        if config.database.max_connections == 0 {
            return Err(BriarError::Configuration(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if config.redis.enabled && config.redis.url.is_empty() {
            return Err(BriarError::Configuration(
                "redis.url must not be empty when caching is enabled".to_string(),
            ));
        }
        if config.redis.default_ttl_secs == 0 {
            return Err(BriarError::Configuration(
                "redis.default_ttl_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_database_url() {
        let mut config = AppConfig::default();
        config.database.url.clear();
        assert!(ConfigLoader::validate(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let mut config = AppConfig::default();
        config.redis.default_ttl_secs = 0;
        assert!(ConfigLoader::validate(&config).is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(ConfigLoader::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_loading_from_missing_dir_uses_defaults() {
        // No files present: only env-source remains, which yields defaults
        // for every section thanks to serde(default).
        let loader = ConfigLoader::new("./does-not-exist");
        let config = loader.load().expect("defaults should load");
        assert_eq!(config.app.name, "briar-catalog");
    }
}
