//! HTTP request handlers.
//!
//! Handlers own the request contract only: multipart decoding, field
//! validation, envelope shaping. Everything stateful goes through the
//! pipeline.

pub mod kyc;
pub mod profile_photo;

use axum::extract::multipart::Multipart;
use std::collections::HashMap;
use vp_media_store::IncomingUpload;

use crate::domain::error::ApiError;

/// A decoded multipart form: at most one file part plus the text fields.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub upload: Option<IncomingUpload>,
    pub fields: HashMap<String, String>,
}

impl MultipartForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Drain a multipart body into a [`MultipartForm`].
///
/// The part named `file_field` becomes the upload; every other part is read
/// as UTF-8 text. Only the first matching file part counts, later
/// duplicates are ignored rather than rejected.
pub async fn read_form(
    mut multipart: Multipart,
    file_field: &str,
) -> Result<MultipartForm, ApiError> {
    let mut form = MultipartForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        let name = match field.name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        if name == file_field && form.upload.is_none() {
            let file_name = field.file_name().unwrap_or(&name).to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {e}")))?;
            form.upload = Some(IncomingUpload {
                file_name,
                content_type,
                bytes,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::bad_request(format!("Failed to read field {name}: {e}")))?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}
