use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};
use std::path::PathBuf;

pub mod logging;
pub mod user;

pub const ARG_CONFIG_DIR: &str = "config-dir";
pub const ARG_BASE_URL: &str = "base-url";
pub const ARG_TOKEN: &str = "token";
pub const ARG_JSON: &str = "json";

pub const ARG_TAKE: &str = "take";
pub const ARG_SEARCH: &str = "search";
pub const ARG_TRASHED: &str = "trashed";
pub const ARG_EXPIRES_IN: &str = "expires-in";
pub const ARG_SESSION_TOKEN: &str = "session-token";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("userdesk")
        .about("Manage users in a directory service")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_CONFIG_DIR)
                .short('c')
                .long("config-dir")
                .help("Directory holding default.toml, <environment>.toml and local.toml")
                .env("USERDESK_CONFIG_DIR")
                .default_value("config")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_BASE_URL)
                .long("base-url")
                .help("Directory API base URL, overrides the configured one")
                .env("USERDESK_BASE_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_TOKEN)
                .long("token")
                .help("Bearer token, overrides the configured and stored ones")
                .env("USERDESK_TOKEN")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_JSON)
                .long("json")
                .help("Print JSON instead of a table")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(list())
        .subcommand(uid_command("show", "Show a user"))
        .subcommand(Command::new("me").about("Show the authenticated user"))
        .subcommand(user::with_field_args(
            Command::new("create").about("Create a user"),
            true,
        ))
        .subcommand(user::with_field_args(
            uid_command("update", "Replace a user"),
            false,
        ))
        .subcommand(user::with_field_args(
            uid_command("patch", "Update some fields of a user"),
            false,
        ))
        .subcommand(uid_command("delete", "Delete a user"))
        .subcommand(uid_command("trash", "Move a user to the trash"))
        .subcommand(uid_command("restore", "Restore a user from the trash"))
        .subcommand(token())
        .subcommand(session());

    logging::with_args(command)
}

fn uid_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name).about(about).arg(user::uid_arg())
}

fn list() -> Command {
    Command::new("list")
        .about("List users")
        .arg(
            Arg::new(ARG_TAKE)
                .long("take")
                .help("Maximum number of users to fetch")
                .value_name("N")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new(ARG_SEARCH)
                .long("search")
                .help("Only users whose uid, name or email contains this text")
                .value_name("QUERY"),
        )
        .arg(
            Arg::new(ARG_TRASHED)
                .long("trashed")
                .help("List trashed users instead of active ones")
                .action(ArgAction::SetTrue),
        )
}

fn token() -> Command {
    uid_command("token", "Issue an access token for a user").arg(
        Arg::new(ARG_EXPIRES_IN)
            .long("expires-in")
            .help("Token lifetime in seconds")
            .value_name("SECS")
            .value_parser(clap::value_parser!(u64).range(1..)),
    )
}

fn session() -> Command {
    Command::new("session")
        .about("Manage the stored session token")
        .subcommand_required(true)
        .subcommand(
            Command::new("set-token").about("Store a bearer token").arg(
                Arg::new(ARG_SESSION_TOKEN)
                    .help("Bearer token")
                    .value_name("TOKEN")
                    .required(true),
            ),
        )
        .subcommand(Command::new("clear").about("Remove the stored token"))
        .subcommand(Command::new("show").about("Show where the session token comes from"))
}
