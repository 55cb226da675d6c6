//! Upload format validation.
//!
//! Policy: the extension-derived format AND the declared content type must
//! BOTH match the allow-list before any bytes reach a storage backend. A
//! mislabeled upload (say, `shell.php` declared as `image/png`, or `a.png`
//! declared as `application/octet-stream`) fails on one side or the other.

use crate::error::FormatError;
use serde::{Deserialize, Serialize};

/// Image formats accepted for profile photos and KYC identity documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// The accepted set: {jpeg, jpg, png}.
    pub const ALLOWED: &'static [ImageFormat] = &[ImageFormat::Jpeg, ImageFormat::Png];

    /// Map a file extension (without the dot) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    /// Map a declared MIME type to a format.
    ///
    /// `image/jpg` is not a registered type but is common in the wild.
    pub fn from_mime(mime: &str) -> Option<Self> {
        // Ignore any parameters, e.g. `image/png; charset=binary`
        let essence = mime.split(';').next().unwrap_or(mime).trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            "image/png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    /// Canonical MIME type for the format.
    pub fn mime(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }
}

/// Validate a declared file name and content type against an allow-list.
///
/// Returns the format derived from the content type on success. No side
/// effects; safe to call before touching any backend.
pub fn validate_upload(
    declared_name: &str,
    content_type: &str,
    allowed: &[ImageFormat],
) -> Result<ImageFormat, FormatError> {
    let ext = declared_name
        .rsplit('.')
        .next()
        .filter(|ext| *ext != declared_name && !ext.is_empty())
        .ok_or_else(|| FormatError::MissingExtension(declared_name.to_string()))?;

    let by_ext = ImageFormat::from_extension(ext)
        .filter(|f| allowed.contains(f))
        .ok_or_else(|| FormatError::Extension(ext.to_string()))?;

    let by_mime = ImageFormat::from_mime(content_type)
        .filter(|f| allowed.contains(f))
        .ok_or_else(|| FormatError::ContentType(content_type.to_string()))?;

    // Both sides passed independently; the declared content type wins as the
    // canonical answer.
    let _ = by_ext;
    Ok(by_mime)
}
