//! Editable user form state.

use crate::dto::{UserForm, UserPayload};
use crate::upload::ImageFile;
use serde_json::Value;
use tracing::debug;
use userdesk_core::{Directory, FormError, ImageError, Metadata, MetadataInput, PictureInput, User};

/// Free-text fields of a user form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Uid,
    Name,
    GivenName,
    MiddleName,
    FamilyName,
    Nickname,
    Email,
    PhoneNumber,
    Comment,
}

/// Form state for creating or editing a user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDraft {
    form: UserForm,
}

impl UserDraft {
    /// Creates an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a draft from an existing user for editing.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            form: UserForm {
                uid: Some(user.uid.clone()),
                name: user.name.clone(),
                given_name: user.given_name.clone(),
                middle_name: user.middle_name.clone(),
                family_name: user.family_name.clone(),
                nickname: user.nickname.clone(),
                email: user.email.clone(),
                phone_number: user.phone_number.clone(),
                comment: user.comment.clone(),
                picture: user.picture.clone().map(PictureInput::from),
                directory: user.directory.clone(),
                metadata: user.metadata.clone().map(MetadataInput::Map),
                tags: user.tags.clone(),
            },
        }
    }

    /// Returns the underlying form.
    #[must_use]
    pub const fn form(&self) -> &UserForm {
        &self.form
    }

    /// Consumes the draft, returning the form.
    #[must_use]
    pub fn into_form(self) -> UserForm {
        self.form
    }

    fn slot(&mut self, field: UserField) -> &mut Option<String> {
        let form = &mut self.form;
        match field {
            UserField::Uid => &mut form.uid,
            UserField::Name => &mut form.name,
            UserField::GivenName => &mut form.given_name,
            UserField::MiddleName => &mut form.middle_name,
            UserField::FamilyName => &mut form.family_name,
            UserField::Nickname => &mut form.nickname,
            UserField::Email => &mut form.email,
            UserField::PhoneNumber => &mut form.phone_number,
            UserField::Comment => &mut form.comment,
        }
    }

    /// Sets a text field as typed.
    pub fn set(&mut self, field: UserField, value: impl Into<String>) -> &mut Self {
        *self.slot(field) = Some(value.into());
        self
    }

    /// Clears a text field.
    pub fn clear(&mut self, field: UserField) -> &mut Self {
        *self.slot(field) = None;
        self
    }

    /// Sets the directory by name.
    pub fn set_directory(&mut self, name: impl Into<String>) -> &mut Self {
        self.form.directory = Some(Directory::Name(name.into()));
        self
    }

    /// Appends a tag. Duplicates are kept.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.form.tags.get_or_insert_with(Vec::new).push(tag.into());
        self
    }

    /// Removes every occurrence of a tag.
    pub fn remove_tag(&mut self, tag: &str) -> &mut Self {
        if let Some(tags) = self.form.tags.as_mut() {
            tags.retain(|t| t != tag);
        }
        self
    }

    /// Returns the current tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        self.form.tags.as_deref().unwrap_or_default()
    }

    /// Sets a metadata entry, overwriting any previous value under the key.
    ///
    /// Metadata entered as an unparseable JSON string is discarded first.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        let mut map = self.metadata();
        map.insert(key.into(), value);
        self.form.metadata = Some(MetadataInput::Map(map));
        self
    }

    /// Removes a metadata entry.
    pub fn remove_metadata(&mut self, key: &str) -> &mut Self {
        let mut map = self.metadata();
        if map.remove(key).is_some() {
            self.form.metadata = Some(MetadataInput::Map(map));
        }
        self
    }

    /// Replaces metadata with raw JSON text, resolved at normalization.
    pub fn set_metadata_json(&mut self, text: impl Into<String>) -> &mut Self {
        self.form.metadata = Some(MetadataInput::Encoded(text.into()));
        self
    }

    /// Returns the current metadata as a mapping.
    #[must_use]
    pub fn metadata(&self) -> Metadata {
        self.form
            .metadata
            .as_ref()
            .and_then(MetadataInput::resolve)
            .unwrap_or_default()
    }

    /// Sets the picture to a URL (or any raw picture string).
    pub fn set_picture_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.form.picture = Some(PictureInput::Text(url.into()));
        self
    }

    /// Removes the picture.
    pub fn clear_picture(&mut self) -> &mut Self {
        self.form.picture = None;
        self
    }

    /// Embeds an uploaded image as the picture.
    ///
    /// On rejection the draft is left unchanged.
    pub fn attach_image(&mut self, image: &ImageFile) -> Result<(), ImageError> {
        let data_url = image.to_data_url()?;
        debug!("Attached image {} ({} bytes)", image.file_name(), image.size());
        self.form.picture = Some(PictureInput::Text(data_url));
        Ok(())
    }

    /// Checks the creation rules.
    pub fn validate(&self) -> Result<(), FormError> {
        self.form.validate_for_create()
    }

    /// Returns the normalized payload.
    #[must_use]
    pub fn to_payload(&self) -> UserPayload {
        self.form.normalize()
    }
}

impl From<UserForm> for UserDraft {
    fn from(form: UserForm) -> Self {
        Self { form }
    }
}
