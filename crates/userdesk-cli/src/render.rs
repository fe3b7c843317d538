//! Table and JSON output.

use anyhow::Result;
use serde::Serialize;
use userdesk_core::User;

const HEADERS: [&str; 6] = ["UID", "NAME", "EMAIL", "DIRECTORY", "TAGS", "TRASHED"];

/// Pretty-printed JSON.
///
/// # Errors
/// Returns an error if the value cannot be serialized
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn row(user: &User) -> [String; 6] {
    [
        user.uid.clone(),
        user.name.clone().unwrap_or_default(),
        user.email.clone().unwrap_or_default(),
        user.directory_name().unwrap_or_default().to_string(),
        user.tags().join(","),
        if user.is_trashed { "yes" } else { "no" }.to_string(),
    ]
}

/// Renders users as a table with columns padded to the widest cell.
#[must_use]
pub fn users_table(users: &[&User]) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }

    let rows: Vec<[String; 6]> = users.iter().copied().map(row).collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[&str]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![line(&HEADERS)];
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(line(&cells));
    }
    lines.join("\n")
}

/// Renders one user as `field: value` lines, skipping absent fields.
#[must_use]
pub fn user_detail(user: &User) -> String {
    let mut fields: Vec<(&str, String)> = vec![("uid", user.uid.clone())];

    if let Some(id) = user.id {
        fields.push(("id", id.to_string()));
    }

    let text = [
        ("name", &user.name),
        ("given name", &user.given_name),
        ("middle name", &user.middle_name),
        ("family name", &user.family_name),
        ("nickname", &user.nickname),
        ("email", &user.email),
        ("phone", &user.phone_number),
        ("comment", &user.comment),
    ];
    for (label, value) in text {
        if let Some(value) = value {
            fields.push((label, value.clone()));
        }
    }

    if let Some(directory) = user.directory_name() {
        fields.push(("directory", directory.to_string()));
    }
    if let Some(picture) = &user.picture {
        let shown = picture
            .display_url()
            .map_or_else(|| format!("({})", picture.kind()), ToString::to_string);
        fields.push(("picture", shown));
    }
    if !user.tags().is_empty() {
        fields.push(("tags", user.tags().join(", ")));
    }
    if let Some(metadata) = user.metadata.as_ref().filter(|m| !m.is_empty()) {
        fields.push(("metadata", serde_json::Value::Object(metadata.clone()).to_string()));
    }
    fields.push(("trashed", if user.is_trashed { "yes" } else { "no" }.to_string()));
    if let Some(created_at) = user.created_at {
        fields.push(("created", created_at.to_rfc3339()));
    }
    if let Some(updated_at) = user.updated_at {
        fields.push(("updated", updated_at.to_rfc3339()));
    }

    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    fields
        .iter()
        .map(|(label, value)| format!("{:<width$}  {}", format!("{}:", label), value, width = width + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(value: serde_json::Value) -> User {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_users_table_alignment() {
        let john = user(json!({
            "uid": "john_doe",
            "name": "John Doe",
            "email": "john@x.com",
            "directory": {"id": 1, "name": "eng"},
            "tags": ["admin", "ops"]
        }));
        let bob = user(json!({"uid": "bob", "is_trashed": true}));

        let table = users_table(&[&john, &bob]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("UID       NAME      EMAIL"));
        assert!(lines[1].starts_with("john_doe  John Doe  john@x.com  eng"));
        assert!(lines[1].contains("admin,ops"));
        assert!(lines[1].ends_with("no"));
        assert!(lines[2].starts_with("bob "));
        assert!(lines[2].ends_with("yes"));
    }

    #[test]
    fn test_users_table_empty() {
        assert_eq!(users_table(&[]), "No users found.");
    }

    #[test]
    fn test_user_detail_skips_absent_fields() {
        let detail = user_detail(&user(json!({
            "uid": "a1",
            "email": "a@b",
            "picture": "https://x.png",
            "metadata": "{\"team\":\"core\"}"
        })));

        assert!(detail.contains("uid:"));
        assert!(detail.contains("a@b"));
        assert!(detail.contains("https://x.png"));
        assert!(detail.contains(r#"{"team":"core"}"#));
        assert!(detail.contains("trashed:"));
        assert!(!detail.contains("nickname"));
        assert!(!detail.contains("directory"));
    }

    #[test]
    fn test_to_json() {
        let value = to_json(&json!({"uid": "a1"})).unwrap();
        assert_eq!(value, "{\n  \"uid\": \"a1\"\n}");
    }
}
