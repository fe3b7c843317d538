//! User-related DTOs.

use serde::{Deserialize, Serialize};
use userdesk_core::validation::rules::non_blank;
use userdesk_core::{
    validate_email, validate_uid, Directory, Envelope, FormError, Metadata, MetadataInput,
    PictureInput, User,
};

/// Paginated list of users.
pub type UserListResponse = Envelope<User>;

/// Raw user input as entered on a form.
///
/// Nothing here is trimmed or checked; [`UserForm::normalize`] produces the
/// payload actually sent to the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserForm {
    pub uid: Option<String>,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub middle_name: Option<String>,
    pub family_name: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub comment: Option<String>,
    pub picture: Option<PictureInput>,
    pub directory: Option<Directory>,
    pub metadata: Option<MetadataInput>,
    pub tags: Option<Vec<String>>,
}

impl UserForm {
    /// Creates a form carrying only a uid.
    #[must_use]
    pub fn with_uid(uid: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
            ..Self::default()
        }
    }

    /// Checks the creation rules, stopping at the first failure.
    pub fn validate_for_create(&self) -> Result<(), FormError> {
        validate_uid(self.uid.as_deref())?;
        validate_email(self.email.as_deref())
    }

    /// Reduces the form to the minimal payload the API accepts.
    ///
    /// Blank text fields, empty tag lists, empty or unparseable metadata and
    /// pictures the API cannot take are all omitted.
    #[must_use]
    pub fn normalize(&self) -> UserPayload {
        UserPayload {
            uid: non_blank(self.uid.as_deref()),
            name: non_blank(self.name.as_deref()),
            given_name: non_blank(self.given_name.as_deref()),
            middle_name: non_blank(self.middle_name.as_deref()),
            family_name: non_blank(self.family_name.as_deref()),
            nickname: non_blank(self.nickname.as_deref()),
            email: non_blank(self.email.as_deref()),
            phone_number: non_blank(self.phone_number.as_deref()),
            comment: non_blank(self.comment.as_deref()),
            picture: self
                .picture
                .as_ref()
                .and_then(PictureInput::resolve)
                .and_then(|picture| picture.transmittable().map(ToString::to_string)),
            directory: self
                .directory
                .as_ref()
                .and_then(|directory| non_blank(Some(directory.name()))),
            metadata: self
                .metadata
                .as_ref()
                .and_then(MetadataInput::resolve)
                .filter(|map| !map.is_empty()),
            tags: self.tags.clone().filter(|tags| !tags.is_empty()),
        }
    }
}

/// Normalized create/update payload.
///
/// Absent fields are never serialized, so the API never sees `null` or `""`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// URL or embedded image data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Directory name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl UserPayload {
    /// Returns true if no field survived normalization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
