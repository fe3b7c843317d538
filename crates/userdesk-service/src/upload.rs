//! Picture upload encoding.
//!
//! An uploaded file becomes an embedded `data:<media type>;base64,<data>`
//! picture. Files larger than [`MAX_IMAGE_BYTES`] or without an `image/*`
//! media type are rejected before anything is encoded.

use base64ct::{Base64, Encoding};
use mime::Mime;
use std::fs;
use std::path::Path;
use tracing::debug;
use userdesk_core::{ImageError, Picture};

/// Upload size limit: 5 MB.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// An image file selected for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    file_name: String,
    media_type: Mime,
    bytes: Vec<u8>,
}

impl ImageFile {
    /// Creates an image file from in-memory content.
    ///
    /// An unparseable media type is kept as `application/octet-stream` and
    /// fails validation later.
    #[must_use]
    pub fn new(file_name: impl Into<String>, media_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type
                .parse()
                .unwrap_or(mime::APPLICATION_OCTET_STREAM),
            bytes,
        }
    }

    /// Reads an image from disk, guessing its media type from the extension.
    ///
    /// The size limit is checked against file metadata before reading.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let size = fs::metadata(path)
            .map_err(|e| ImageError::Unreadable(format!("{}: {}", path.display(), e)))?
            .len();
        if size > MAX_IMAGE_BYTES {
            return Err(ImageError::TooLarge {
                size,
                limit: MAX_IMAGE_BYTES,
            });
        }

        let media_type = mime_guess::from_path(path).first_or_octet_stream();
        let bytes =
            fs::read(path).map_err(|e| ImageError::Unreadable(format!("{}: {}", path.display(), e)))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        debug!("Read {} ({} bytes, {})", file_name, bytes.len(), media_type);
        Ok(Self {
            file_name,
            media_type,
            bytes,
        })
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub const fn media_type(&self) -> &Mime {
        &self.media_type
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Checks the size limit and media type.
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.size() > MAX_IMAGE_BYTES {
            return Err(ImageError::TooLarge {
                size: self.size(),
                limit: MAX_IMAGE_BYTES,
            });
        }
        if self.media_type.type_() != mime::IMAGE {
            return Err(ImageError::NotAnImage(self.media_type.essence_str().to_string()));
        }
        Ok(())
    }

    /// Encodes the file as a `data:` URL.
    pub fn to_data_url(&self) -> Result<String, ImageError> {
        self.validate()?;
        Ok(format!(
            "data:{};base64,{}",
            self.media_type.essence_str(),
            Base64::encode_string(&self.bytes)
        ))
    }

    /// Encodes the file as an embedded picture.
    pub fn to_picture(&self) -> Result<Picture, ImageError> {
        self.to_data_url().map(Picture::Embedded)
    }
}

impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type.essence_str())
            .field("size", &self.bytes.len())
            .finish()
    }
}
