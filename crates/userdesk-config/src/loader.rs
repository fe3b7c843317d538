//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use userdesk_core::{UserdeskError, UserdeskResult};

/// Prefix of environment variable overrides (`USERDESK__API__BASE_URL`).
pub const ENV_PREFIX: &str = "USERDESK";

/// Variable selecting the environment-specific file.
pub const ENVIRONMENT_VAR: &str = "USERDESK_ENVIRONMENT";

/// Configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `.env` in the working directory, if present
    /// 2. `{dir}/default.toml` - Default values
    /// 3. `{dir}/{environment}.toml` - Environment-specific overrides
    /// 4. `{dir}/local.toml` - Local overrides
    /// 5. Environment variables with `USERDESK__` prefix
    pub fn new(config_dir: impl Into<PathBuf>) -> UserdeskResult<Self> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self { config, config_dir })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> UserdeskResult<Self> {
        Self::new("./config")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// Returns the directory configuration files are read from.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Reloads the configuration from disk and environment.
    pub fn reload(&mut self) -> UserdeskResult<()> {
        self.config = Self::load_config(&self.config_dir)?;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    fn load_config(config_dir: &Path) -> UserdeskResult<AppConfig> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment_override = std::env::var(ENVIRONMENT_VAR).ok();
        let environment = environment_override
            .clone()
            .unwrap_or_else(|| "development".to_string());

        debug!(
            "Loading configuration for environment: {} from {}",
            environment,
            config_dir.display()
        );

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = config_dir.join(format!("{}.toml", name));
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path.as_path()).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_userdesk_error)?;

        let mut app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_userdesk_error)?;

        if let Some(environment) = environment_override {
            app_config.app.environment = environment;
        }

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    fn validate_config(config: &AppConfig) -> UserdeskResult<()> {
        ConfigValidator::validate(config)
            .map_err(|errors| UserdeskError::configuration(format_validation_errors(&errors)))
    }
}

fn config_error_to_userdesk_error(err: ConfigError) -> UserdeskError {
    UserdeskError::Configuration(err.to_string())
}
