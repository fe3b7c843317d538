use crate::cli::{actions::Action, actions::Context, commands, dispatch, globals::GlobalArgs};
use anyhow::{anyhow, Result};
use tracing::debug;
use userdesk_config::{format_validation_errors, ConfigLoader, ConfigValidator};
use userdesk_core::init_telemetry;

/// Parses the command line, loads configuration and installs logging.
///
/// # Errors
/// Returns an error if the configuration is invalid or logging cannot be
/// initialized
pub fn start() -> Result<(Action, Context)> {
    let matches = commands::new().get_matches();
    let globals = GlobalArgs::from_matches(&matches);

    let mut config = ConfigLoader::new(&globals.config_dir)?.into_config();
    globals.apply(&mut config);
    ConfigValidator::validate(&config).map_err(|errors| anyhow!(format_validation_errors(&errors)))?;

    init_telemetry(&config.observability)?;
    debug!("Global args: {:?}", globals);

    let action = dispatch::handler(&matches)?;

    Ok((action, Context::new(config, globals.json)))
}
