use anyhow::Result;
use serde_json::Value;
use std::path::PathBuf;
use userdesk_service::{ImageFile, UserDraft, UserField};

/// User form values taken from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFields {
    pub uid: Option<String>,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub middle_name: Option<String>,
    pub family_name: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub comment: Option<String>,
    pub directory: Option<String>,
    pub picture: Option<String>,
    pub picture_file: Option<PathBuf>,
    pub tags: Vec<String>,
    pub meta: Vec<(String, String)>,
    pub metadata: Option<String>,
}

impl UserFields {
    /// Builds a draft from the given values.
    ///
    /// `--metadata` is applied before the `--meta` entries, so single entries
    /// overwrite keys from the JSON object.
    ///
    /// # Errors
    /// Returns an error if the picture file is unreadable, too large or not
    /// an image
    pub fn to_draft(&self) -> Result<UserDraft> {
        let mut draft = UserDraft::new();

        let text = [
            (UserField::Uid, &self.uid),
            (UserField::Name, &self.name),
            (UserField::GivenName, &self.given_name),
            (UserField::MiddleName, &self.middle_name),
            (UserField::FamilyName, &self.family_name),
            (UserField::Nickname, &self.nickname),
            (UserField::Email, &self.email),
            (UserField::PhoneNumber, &self.phone),
            (UserField::Comment, &self.comment),
        ];
        for (field, value) in text {
            if let Some(value) = value {
                draft.set(field, value.as_str());
            }
        }

        if let Some(directory) = &self.directory {
            draft.set_directory(directory.as_str());
        }

        if let Some(picture) = &self.picture {
            draft.set_picture_url(picture.as_str());
        }
        if let Some(path) = &self.picture_file {
            let image = ImageFile::from_path(path)?;
            draft.attach_image(&image)?;
        }

        for tag in &self.tags {
            draft.add_tag(tag.as_str());
        }

        if let Some(metadata) = &self.metadata {
            draft.set_metadata_json(metadata.as_str());
        }
        for (key, value) in &self.meta {
            draft.set_metadata(key.as_str(), meta_value(value));
        }

        Ok(draft)
    }
}

/// Parses a `--meta` value as JSON, keeping it as a string otherwise.
fn meta_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_to_draft_text_fields() {
        let fields = UserFields {
            uid: Some(" a1 ".to_string()),
            email: Some("a@b".to_string()),
            phone: Some("   ".to_string()),
            directory: Some(" eng ".to_string()),
            tags: vec!["x".to_string(), "x".to_string()],
            ..UserFields::default()
        };
        let payload = fields.to_draft().unwrap().to_payload();

        assert_eq!(payload.uid.as_deref(), Some("a1"));
        assert_eq!(payload.email.as_deref(), Some("a@b"));
        assert_eq!(payload.phone_number, None);
        assert_eq!(payload.directory.as_deref(), Some("eng"));
        assert_eq!(payload.tags, Some(vec!["x".to_string(), "x".to_string()]));
    }

    #[test]
    fn test_meta_entries_overwrite_metadata_json() {
        let fields = UserFields {
            metadata: Some(r#"{"team":"core","level":1}"#.to_string()),
            meta: vec![
                ("level".to_string(), "2".to_string()),
                ("note".to_string(), "hello".to_string()),
            ],
            ..UserFields::default()
        };
        let payload = fields.to_draft().unwrap().to_payload();

        assert_eq!(
            serde_json::to_value(payload.metadata).unwrap(),
            json!({"team": "core", "level": 2, "note": "hello"})
        );
    }

    #[test]
    fn test_picture_url_is_classified() {
        let fields = UserFields {
            picture: Some("ftp://x".to_string()),
            ..UserFields::default()
        };
        assert_eq!(fields.to_draft().unwrap().to_payload().picture, None);
    }

    #[test]
    fn test_picture_file_is_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("avatar.png");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(&[0x89, b'P', b'N', b'G'])
            .unwrap();

        let fields = UserFields {
            picture_file: Some(path),
            ..UserFields::default()
        };
        let picture = fields.to_draft().unwrap().to_payload().picture.unwrap();
        assert!(picture.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_non_image_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let fields = UserFields {
            picture_file: Some(path),
            ..UserFields::default()
        };
        assert!(fields.to_draft().is_err());
    }

    #[test]
    fn test_meta_value() {
        assert_eq!(meta_value("1"), json!(1));
        assert_eq!(meta_value("true"), json!(true));
        assert_eq!(meta_value("plain text"), json!("plain text"));
    }
}
