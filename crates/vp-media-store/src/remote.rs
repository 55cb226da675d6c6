//! Remote object-storage backend over HTTP.

use crate::error::StoreError;
use crate::store::{object_key, AssetRef, DeleteOutcome, IncomingUpload, MediaStore, StoreConstraints};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

/// Media store backed by an HTTP object-storage endpoint.
///
/// Objects are written with `PUT <base_url>/<key>` and removed with
/// `DELETE <reference>`. The issued [`AssetRef`] is the full object URL, so
/// clients can fetch it directly. Works against any S3-style HTTP gateway
/// that accepts plain PUT/DELETE.
pub struct HttpObjectStore {
    client: reqwest::Client,
    base_url: String,
    prefix: String,
}

impl HttpObjectStore {
    /// Create a store writing under `base_url`, issuing keys under `prefix`.
    pub fn new(base_url: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            prefix: prefix.into(),
        }
    }

    /// Create a store with a caller-supplied client (custom timeouts, TLS).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl MediaStore for HttpObjectStore {
    async fn store(
        &self,
        upload: &IncomingUpload,
        constraints: &StoreConstraints,
    ) -> Result<AssetRef, StoreError> {
        let format = constraints.check(upload)?;

        let key = object_key(&self.prefix, &upload.file_name);
        let url = format!("{}/{}", self.base_url, key);

        let response = self
            .client
            .put(&url)
            .header(reqwest::header::CONTENT_TYPE, format.mime())
            .body(upload.bytes.clone())
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        match response.status() {
            s if s.is_success() => {
                debug!(url = %url, size = upload.bytes.len(), "stored remote object");
                Ok(AssetRef::new(url))
            }
            StatusCode::PAYLOAD_TOO_LARGE | StatusCode::INSUFFICIENT_STORAGE => {
                Err(StoreError::QuotaExceeded {
                    size: upload.bytes.len(),
                    max: constraints.max_bytes,
                })
            }
            s => Err(StoreError::Unavailable(format!(
                "object store returned {s} for PUT {url}"
            ))),
        }
    }

    async fn delete(&self, reference: &AssetRef) -> Result<DeleteOutcome, StoreError> {
        // Only URLs this store issued are deletable through it.
        if !reference.as_str().starts_with(&self.base_url) {
            return Err(StoreError::InvalidReference(reference.to_string()));
        }

        let response = self
            .client
            .delete(reference.as_str())
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        match response.status() {
            // Missing object counts as done: delete is idempotent.
            StatusCode::NOT_FOUND => Ok(DeleteOutcome::NotFound),
            s if s.is_success() => {
                debug!(reference = %reference, "deleted remote object");
                Ok(DeleteOutcome::Deleted)
            }
            s => Err(StoreError::Unavailable(format!(
                "object store returned {s} for DELETE {reference}"
            ))),
        }
    }
}
