use clap::{builder::ValueParser, Arg, Command};

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ARG_LOG_LEVEL: &str = "log-level";

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<String, String> {
        let level = level.to_lowercase();
        if LEVELS.contains(&level.as_str()) {
            Ok(level)
        } else {
            Err(format!("invalid log level, expected one of: {}", LEVELS.join(", ")))
        }
    })
}

/// Map the verbosity count and explicit level to a log filter, if any.
///
/// `-v` means debug and `-vv` trace; both win over `--log-level`.
#[must_use]
pub fn level_from(verbosity: u8, log_level: Option<&str>) -> Option<String> {
    match verbosity {
        0 => log_level.map(ToString::to_string),
        1 => Some("debug".to_string()),
        _ => Some("trace".to_string()),
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v debug, -vv trace)")
                .global(true)
                .action(clap::ArgAction::Count),
        )
        .arg(
            Arg::new(ARG_LOG_LEVEL)
                .long("log-level")
                .help("Log level: error, warn, info, debug, trace")
                .env("USERDESK_LOG_LEVEL")
                .global(true)
                .value_parser(validator_log_level()),
        )
}
