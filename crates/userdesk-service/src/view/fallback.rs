//! Built-in sample users shown when the directory cannot be reached.

use serde_json::json;
use userdesk_core::{Directory, User, UserId};

/// Returns the static fallback user set.
#[must_use]
pub fn sample_users() -> Vec<User> {
    let mut john = User::new("john_doe");
    john.id = Some(UserId(1));
    john.name = Some("John Doe".to_string());
    john.given_name = Some("John".to_string());
    john.family_name = Some("Doe".to_string());
    john.email = Some("john.doe@example.com".to_string());
    john.directory = Some(Directory::from("engineering"));
    john.tags = Some(vec!["admin".to_string(), "engineering".to_string()]);

    let mut jane = User::new("jane_smith");
    jane.id = Some(UserId(2));
    jane.name = Some("Jane Smith".to_string());
    jane.given_name = Some("Jane".to_string());
    jane.family_name = Some("Smith".to_string());
    jane.email = Some("jane.smith@example.com".to_string());
    jane.phone_number = Some("+1 555 0100".to_string());
    jane.directory = Some(Directory::from("sales"));
    jane.tags = Some(vec!["sales".to_string()]);

    let mut bot = User::new("ops-bot");
    bot.id = Some(UserId(3));
    bot.name = Some("Ops Bot".to_string());
    bot.nickname = Some("bot".to_string());
    bot.comment = Some("Service account for automation".to_string());
    bot.tags = Some(vec!["bot".to_string(), "automation".to_string()]);
    bot.metadata = json!({"managed_by": "platform"}).as_object().cloned();

    vec![john, jane, bot]
}
