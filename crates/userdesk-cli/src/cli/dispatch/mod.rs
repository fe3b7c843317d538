use crate::cli::{
    actions::{Action, ListOptions, SessionAction, UserFields},
    commands::{self, user},
};
use anyhow::{anyhow, Result};
use clap::ArgMatches;
use secrecy::SecretString;
use std::path::PathBuf;

/// Maps parsed arguments to the action to run.
///
/// # Errors
/// Returns an error for an unknown subcommand
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let action = match matches.subcommand() {
        Some(("list", sub)) => Action::List(ListOptions {
            take: sub.get_one::<u32>(commands::ARG_TAKE).copied(),
            search: sub.get_one::<String>(commands::ARG_SEARCH).cloned(),
            trashed: sub.get_flag(commands::ARG_TRASHED),
        }),
        Some(("show", sub)) => Action::Show { uid: uid(sub)? },
        Some(("me", _)) => Action::Me,
        Some(("create", sub)) => Action::Create(user_fields(sub)),
        Some(("update", sub)) => Action::Update {
            uid: uid(sub)?,
            fields: user_fields(sub),
        },
        Some(("patch", sub)) => Action::Patch {
            uid: uid(sub)?,
            fields: user_fields(sub),
        },
        Some(("delete", sub)) => Action::Delete { uid: uid(sub)? },
        Some(("trash", sub)) => Action::Trash { uid: uid(sub)? },
        Some(("restore", sub)) => Action::Restore { uid: uid(sub)? },
        Some(("token", sub)) => Action::Token {
            uid: uid(sub)?,
            expires_in: sub.get_one::<u64>(commands::ARG_EXPIRES_IN).copied(),
        },
        Some(("session", sub)) => Action::Session(session(sub)?),
        Some((name, _)) => return Err(anyhow!("Unknown command: {}", name)),
        None => return Err(anyhow!("No command given")),
    };

    Ok(action)
}

fn uid(matches: &ArgMatches) -> Result<String> {
    matches
        .get_one::<String>(user::ARG_UID)
        .cloned()
        .ok_or_else(|| anyhow!("Missing user ID"))
}

fn session(matches: &ArgMatches) -> Result<SessionAction> {
    match matches.subcommand() {
        Some(("set-token", sub)) => sub
            .get_one::<String>(commands::ARG_SESSION_TOKEN)
            .map(|token| SessionAction::SetToken(SecretString::from(token.clone())))
            .ok_or_else(|| anyhow!("Missing token")),
        Some(("clear", _)) => Ok(SessionAction::Clear),
        Some(("show", _)) => Ok(SessionAction::Show),
        _ => Err(anyhow!("Unknown session command")),
    }
}

fn user_fields(matches: &ArgMatches) -> UserFields {
    let text = |id: &str| matches.get_one::<String>(id).cloned();

    UserFields {
        uid: text(user::ARG_UID_FIELD),
        name: text(user::ARG_NAME),
        given_name: text(user::ARG_GIVEN_NAME),
        middle_name: text(user::ARG_MIDDLE_NAME),
        family_name: text(user::ARG_FAMILY_NAME),
        nickname: text(user::ARG_NICKNAME),
        email: text(user::ARG_EMAIL),
        phone: text(user::ARG_PHONE),
        comment: text(user::ARG_COMMENT),
        directory: text(user::ARG_DIRECTORY),
        picture: text(user::ARG_PICTURE),
        picture_file: matches.get_one::<PathBuf>(user::ARG_PICTURE_FILE).cloned(),
        tags: matches
            .get_many::<String>(user::ARG_TAG)
            .map(|tags| tags.cloned().collect())
            .unwrap_or_default(),
        meta: matches
            .get_many::<(String, String)>(user::ARG_META)
            .map(|pairs| pairs.cloned().collect())
            .unwrap_or_default(),
        metadata: text(user::ARG_METADATA),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    const ENV_VARS: [(&str, Option<&str>); 4] = [
        ("USERDESK_CONFIG_DIR", None),
        ("USERDESK_BASE_URL", None),
        ("USERDESK_TOKEN", None),
        ("USERDESK_LOG_LEVEL", None),
    ];

    fn dispatch(args: &[&str]) -> Action {
        temp_env::with_vars(ENV_VARS, || {
            let matches = commands::new().get_matches_from(args.iter().copied());
            handler(&matches).unwrap()
        })
    }

    #[test]
    fn test_list() {
        match dispatch(&["userdesk", "list", "--take", "5", "--search", "jo", "--trashed"]) {
            Action::List(options) => {
                assert_eq!(options.take, Some(5));
                assert_eq!(options.search.as_deref(), Some("jo"));
                assert!(options.trashed);
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_list_defaults() {
        match dispatch(&["userdesk", "list"]) {
            Action::List(options) => assert_eq!(options, ListOptions::default()),
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_create_fields() {
        let action = dispatch(&[
            "userdesk",
            "create",
            "--uid",
            "a1",
            "--email",
            "a@b",
            "--tag",
            "x",
            "--tag",
            "y",
            "--meta",
            "team=core",
            "--directory",
            "eng",
        ]);
        match action {
            Action::Create(fields) => {
                assert_eq!(fields.uid.as_deref(), Some("a1"));
                assert_eq!(fields.email.as_deref(), Some("a@b"));
                assert_eq!(fields.tags, vec!["x".to_string(), "y".to_string()]);
                assert_eq!(fields.meta, vec![("team".to_string(), "core".to_string())]);
                assert_eq!(fields.directory.as_deref(), Some("eng"));
                assert_eq!(fields.name, None);
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_patch_keeps_positional_uid_apart() {
        match dispatch(&["userdesk", "patch", "a1", "--name", "Ann"]) {
            Action::Patch { uid, fields } => {
                assert_eq!(uid, "a1");
                assert_eq!(fields.uid, None);
                assert_eq!(fields.name.as_deref(), Some("Ann"));
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_uid_commands() {
        assert!(matches!(
            dispatch(&["userdesk", "show", "a1"]),
            Action::Show { uid } if uid == "a1"
        ));
        assert!(matches!(
            dispatch(&["userdesk", "delete", "a1"]),
            Action::Delete { uid } if uid == "a1"
        ));
        assert!(matches!(
            dispatch(&["userdesk", "trash", "a1"]),
            Action::Trash { uid } if uid == "a1"
        ));
        assert!(matches!(
            dispatch(&["userdesk", "restore", "a1"]),
            Action::Restore { uid } if uid == "a1"
        ));
        assert!(matches!(dispatch(&["userdesk", "me"]), Action::Me));
    }

    #[test]
    fn test_token() {
        assert!(matches!(
            dispatch(&["userdesk", "token", "a1", "--expires-in", "3600"]),
            Action::Token { uid, expires_in: Some(3600) } if uid == "a1"
        ));
        assert!(matches!(
            dispatch(&["userdesk", "token", "a1"]),
            Action::Token { expires_in: None, .. }
        ));
    }

    #[test]
    fn test_session() {
        match dispatch(&["userdesk", "session", "set-token", "abc"]) {
            Action::Session(SessionAction::SetToken(token)) => {
                assert_eq!(token.expose_secret(), "abc");
            }
            other => panic!("unexpected action: {:?}", other),
        }
        assert!(matches!(
            dispatch(&["userdesk", "session", "clear"]),
            Action::Session(SessionAction::Clear)
        ));
        assert!(matches!(
            dispatch(&["userdesk", "session", "show"]),
            Action::Session(SessionAction::Show)
        ));
    }
}
