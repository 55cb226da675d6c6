//! Error types for the media store.

use thiserror::Error;

/// Rejection reasons from the upload format validator.
///
/// Both checks are independent: a mislabeled upload fails on whichever side
/// does not match the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The declared file name carries no extension at all.
    #[error("file name `{0}` has no extension")]
    MissingExtension(String),

    /// The file extension is not in the accepted set.
    #[error("file extension `{0}` is not an accepted image format")]
    Extension(String),

    /// The declared content type is not in the accepted set.
    #[error("content type `{0}` is not an accepted image format")]
    ContentType(String),
}

/// Failures surfaced by a [`MediaStore`](crate::MediaStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The upload did not pass the backend's format constraints.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(#[from] FormatError),

    /// The upload exceeds the backend's size constraint.
    #[error("quota exceeded: {size} bytes over limit of {max}")]
    QuotaExceeded { size: usize, max: usize },

    /// The backend cannot be reached or refused service.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    /// A reference that this backend could never have issued.
    #[error("invalid asset reference: {0}")]
    InvalidReference(String),

    /// Local I/O failure.
    #[error("storage io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}
