//! The `MediaStore` port and its value objects.

use crate::error::StoreError;
use crate::format::{validate_upload, ImageFormat};
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Durable locator for one stored asset (relative path or URL).
///
/// At most one *current* reference of a given kind (profile photo, KYC
/// document) is associated with a user at any time; the record store owns
/// that pointer, this type only names the object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(String);

impl AssetRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One uploaded file, valid for the duration of a single request.
///
/// Never persisted as-is; only the [`AssetRef`] derived from it survives.
#[derive(Debug, Clone)]
pub struct IncomingUpload {
    /// File name as declared by the client.
    pub file_name: String,
    /// Content type as declared by the client.
    pub content_type: String,
    /// Raw file bytes.
    pub bytes: Bytes,
}

/// Constraints a backend enforces on every `store` call.
#[derive(Debug, Clone)]
pub struct StoreConstraints {
    /// Accepted image formats.
    pub allowed: Vec<ImageFormat>,
    /// Maximum object size in bytes.
    pub max_bytes: usize,
}

impl Default for StoreConstraints {
    fn default() -> Self {
        Self {
            allowed: ImageFormat::ALLOWED.to_vec(),
            max_bytes: 5 * 1024 * 1024, // 5MB
        }
    }
}

impl StoreConstraints {
    /// Run the format and size checks shared by every adapter.
    pub fn check(&self, upload: &IncomingUpload) -> Result<ImageFormat, StoreError> {
        let format = validate_upload(&upload.file_name, &upload.content_type, &self.allowed)?;
        if upload.bytes.len() > self.max_bytes {
            return Err(StoreError::QuotaExceeded {
                size: upload.bytes.len(),
                max: self.max_bytes,
            });
        }
        Ok(format)
    }
}

/// Result of a delete. Deleting a reference that no longer exists is a
/// success, so callers can retry and sweeps can race without special cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The object existed and was removed.
    Deleted,
    /// No object at that reference; treated as already done.
    NotFound,
}

/// Abstract interface over "store raw file bytes, get back a stable
/// reference" and "delete a previously stored reference".
///
/// Production: [`LocalDiskStore`](crate::LocalDiskStore) or
/// [`HttpObjectStore`](crate::HttpObjectStore).
/// Testing: [`InMemoryMediaStore`](crate::InMemoryMediaStore).
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persist the upload and return its reference.
    ///
    /// The bytes are durably retrievable at the returned reference before
    /// this returns; there is no eventual-consistency window for callers.
    async fn store(
        &self,
        upload: &IncomingUpload,
        constraints: &StoreConstraints,
    ) -> Result<AssetRef, StoreError>;

    /// Remove a previously stored object. Idempotent.
    async fn delete(&self, reference: &AssetRef) -> Result<DeleteOutcome, StoreError>;
}

/// Build a unique object key: `<prefix>/<unix-millis>-<sanitized name>`.
///
/// The declared name is reduced to its final path component and any
/// character outside `[A-Za-z0-9._-]` is replaced, so client input can never
/// steer the key outside the prefix.
pub fn object_key(prefix: &str, declared_name: &str) -> String {
    let base = declared_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(declared_name);
    let safe: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("{}/{}-{}", prefix.trim_end_matches('/'), millis, safe)
}
