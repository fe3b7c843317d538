//! Picture value object.

use crate::PictureId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Prefix of an embedded base64 image.
pub const EMBEDDED_IMAGE_PREFIX: &str = "data:image";

/// Prefix of an external picture URL.
pub const URL_PREFIX: &str = "http";

/// Server-side reference to a stored picture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PictureRef {
    /// Server id of the picture.
    pub id: PictureId,
    /// URL of the thumbnail rendition.
    #[serde(default, alias = "thumbnail", skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// URL of the original upload.
    #[serde(default, alias = "raw", skip_serializing_if = "Option::is_none")]
    pub raw_url: Option<String>,
}

/// A user's picture.
///
/// Raw strings are classified once, by [`Picture::classify`]; everything
/// downstream matches on the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Picture {
    /// External image URL.
    Url(String),
    /// Embedded `data:image/...;base64,...` string.
    Embedded(String),
    /// Picture stored by the server.
    Reference(PictureRef),
}

impl Picture {
    /// Classifies a raw picture string.
    ///
    /// Returns `None` for strings the API cannot accept (anything that is
    /// neither embedded image data nor an `http` URL).
    #[must_use]
    pub fn classify(value: &str) -> Option<Self> {
        if value.starts_with(EMBEDDED_IMAGE_PREFIX) {
            Some(Self::Embedded(value.to_string()))
        } else if value.starts_with(URL_PREFIX) {
            Some(Self::Url(value.to_string()))
        } else {
            None
        }
    }

    /// Returns the string to send on a write, if this picture can be sent.
    ///
    /// A stored reference is already on the server and is never resent.
    #[must_use]
    pub fn transmittable(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url),
            Self::Embedded(data) => Some(data),
            Self::Reference(_) => None,
        }
    }

    /// Returns a URL suitable for display, preferring thumbnails.
    #[must_use]
    pub fn display_url(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url),
            Self::Embedded(_) => None,
            Self::Reference(reference) => reference
                .thumbnail_url
                .as_deref()
                .or(reference.raw_url.as_deref()),
        }
    }

    /// Short label for the variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Url(_) => "url",
            Self::Embedded(_) => "embedded",
            Self::Reference(_) => "reference",
        }
    }
}

impl<'de> Deserialize<'de> for Picture {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        PictureInput::deserialize(deserializer)?
            .resolve()
            .ok_or_else(|| serde::de::Error::custom("unrecognized picture value"))
    }
}

/// Picture as entered on a form, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PictureInput {
    /// Raw string: URL, embedded data, or something unusable.
    Text(String),
    /// Existing server-side picture.
    Reference(PictureRef),
}

impl PictureInput {
    /// Classifies the input into a [`Picture`].
    #[must_use]
    pub fn resolve(&self) -> Option<Picture> {
        match self {
            Self::Text(text) => Picture::classify(text),
            Self::Reference(reference) => Some(Picture::Reference(reference.clone())),
        }
    }
}

impl From<Picture> for PictureInput {
    fn from(picture: Picture) -> Self {
        match picture {
            Picture::Url(text) | Picture::Embedded(text) => Self::Text(text),
            Picture::Reference(reference) => Self::Reference(reference),
        }
    }
}

/// Deserializes an optional picture, treating unrecognized values as absent.
pub fn deserialize_picture_lenient<'de, D>(deserializer: D) -> Result<Option<Picture>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| serde_json::from_value::<PictureInput>(v).ok())
        .and_then(|input| input.resolve()))
}
