//! Profile photo replacement endpoint.

use axum::extract::{multipart::Multipart, State};
use axum::{Extension, Json};
use tracing::info;
use vp_records::Identity;

use crate::domain::error::ApiError;
use crate::domain::response::ProfilePhotoResponse;
use crate::handlers::read_form;
use crate::router::AppState;

/// File part name for the uploaded photo.
pub const PHOTO_FIELD: &str = "photo";

/// `POST /profile/photo`
///
/// Multipart body with one `photo` file part. Replaces the caller's current
/// photo; the superseded file is deleted only after the new reference is
/// committed.
pub async fn replace_photo(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    multipart: Multipart,
) -> Result<Json<ProfilePhotoResponse>, ApiError> {
    if identity.is_empty() {
        return Err(ApiError::bad_request("identity required"));
    }
    let form = read_form(multipart, PHOTO_FIELD).await?;

    let reference = state
        .pipeline
        .replace_profile_photo(&identity, form.upload)
        .await?;

    info!(identity = %identity, reference = %reference, "profile photo replaced");
    Ok(Json(ProfilePhotoResponse::new(
        identity.to_string(),
        reference,
    )))
}
