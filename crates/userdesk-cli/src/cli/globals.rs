use crate::cli::commands::{self, logging};
use clap::ArgMatches;
use secrecy::{ExposeSecret, SecretString};
use std::{fmt, path::PathBuf};
use userdesk_config::AppConfig;

/// Options shared by every subcommand.
#[derive(Clone, Default)]
pub struct GlobalArgs {
    pub config_dir: PathBuf,
    pub base_url: Option<String>,
    pub token: Option<SecretString>,
    pub json: bool,
    pub log_level: Option<String>,
}

impl GlobalArgs {
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let verbosity = matches.get_count(logging::ARG_VERBOSITY);
        let log_level = matches
            .get_one::<String>(logging::ARG_LOG_LEVEL)
            .map(String::as_str);

        Self {
            config_dir: matches
                .get_one::<PathBuf>(commands::ARG_CONFIG_DIR)
                .cloned()
                .unwrap_or_else(|| PathBuf::from("config")),
            base_url: matches.get_one::<String>(commands::ARG_BASE_URL).cloned(),
            token: matches
                .get_one::<String>(commands::ARG_TOKEN)
                .map(|token| SecretString::from(token.clone())),
            json: matches.get_flag(commands::ARG_JSON),
            log_level: logging::level_from(verbosity, log_level),
        }
    }

    /// Applies command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(base_url) = &self.base_url {
            config.api.base_url.clone_from(base_url);
        }
        if let Some(token) = &self.token {
            config.session.auth_token = Some(token.expose_secret().to_string());
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level.clone_from(level);
        }
    }
}

impl fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("config_dir", &self.config_dir)
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("json", &self.json)
            .field("log_level", &self.log_level)
            .finish()
    }
}
