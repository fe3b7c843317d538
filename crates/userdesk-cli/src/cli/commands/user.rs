use clap::{Arg, ArgAction, Command};

pub const ARG_UID_FIELD: &str = "uid-field";
pub const ARG_NAME: &str = "name";
pub const ARG_GIVEN_NAME: &str = "given-name";
pub const ARG_MIDDLE_NAME: &str = "middle-name";
pub const ARG_FAMILY_NAME: &str = "family-name";
pub const ARG_NICKNAME: &str = "nickname";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PHONE: &str = "phone";
pub const ARG_COMMENT: &str = "comment";
pub const ARG_DIRECTORY: &str = "directory";
pub const ARG_PICTURE: &str = "picture";
pub const ARG_PICTURE_FILE: &str = "picture-file";
pub const ARG_TAG: &str = "tag";
pub const ARG_META: &str = "meta";
pub const ARG_METADATA: &str = "metadata";

/// Positional uid of the user a command operates on.
pub const ARG_UID: &str = "uid";

/// Splits a `KEY=VALUE` metadata pair.
///
/// # Errors
/// Returns an error string if there is no `=` or the key is empty.
pub fn parse_meta(pair: &str) -> Result<(String, String), String> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", pair)),
    }
}

#[must_use]
pub fn uid_arg() -> Arg {
    Arg::new(ARG_UID)
        .help("User ID")
        .required(true)
        .value_name("UID")
}

/// Adds the user form flags. `--uid` is required on create only.
#[must_use]
pub fn with_field_args(command: Command, uid_required: bool) -> Command {
    let text = |id: &'static str, long: &'static str, help: &'static str| {
        Arg::new(id).long(long).help(help).value_name("TEXT")
    };

    command
        .arg(
            Arg::new(ARG_UID_FIELD)
                .long("uid")
                .help("User ID (must contain a non-digit and no whitespace)")
                .value_name("UID")
                .required(uid_required),
        )
        .arg(text(ARG_NAME, "name", "Display name"))
        .arg(text(ARG_GIVEN_NAME, "given-name", "Given name"))
        .arg(text(ARG_MIDDLE_NAME, "middle-name", "Middle name"))
        .arg(text(ARG_FAMILY_NAME, "family-name", "Family name"))
        .arg(text(ARG_NICKNAME, "nickname", "Nickname"))
        .arg(text(ARG_EMAIL, "email", "Email address"))
        .arg(text(ARG_PHONE, "phone", "Phone number"))
        .arg(text(ARG_COMMENT, "comment", "Free-text comment"))
        .arg(text(ARG_DIRECTORY, "directory", "Directory name"))
        .arg(
            Arg::new(ARG_PICTURE)
                .long("picture")
                .help("Picture URL (http/https) or data:image URI")
                .value_name("URL")
                .conflicts_with(ARG_PICTURE_FILE),
        )
        .arg(
            Arg::new(ARG_PICTURE_FILE)
                .long("picture-file")
                .help("Image file to embed as the picture (max 5 MB)")
                .value_name("PATH")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            Arg::new(ARG_TAG)
                .long("tag")
                .help("Add a tag (repeatable)")
                .value_name("TAG")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new(ARG_META)
                .long("meta")
                .help("Set a metadata entry; VALUE is parsed as JSON when possible (repeatable)")
                .value_name("KEY=VALUE")
                .action(ArgAction::Append)
                .value_parser(parse_meta),
        )
        .arg(
            Arg::new(ARG_METADATA)
                .long("metadata")
                .help("Metadata as a JSON object")
                .value_name("JSON"),
        )
}
