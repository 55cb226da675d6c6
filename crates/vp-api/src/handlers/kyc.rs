//! KYC submission endpoint.

use axum::extract::{multipart::Multipart, State};
use axum::{Extension, Json};
use tracing::info;
use vp_records::Identity;

use crate::domain::error::ApiError;
use crate::domain::response::KycResponse;
use crate::handlers::read_form;
use crate::router::AppState;
use crate::sanitize::validate_kyc_fields;

/// File part name for the identity document.
pub const DOCUMENT_FIELD: &str = "identity_doc";

/// `POST /kyc`
///
/// Multipart body with `residential_address` and `work_address` text fields
/// plus one `identity_doc` file part. Field failures are collected and
/// reported together before the file is touched.
pub async fn submit_kyc(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    multipart: Multipart,
) -> Result<Json<KycResponse>, ApiError> {
    if identity.is_empty() {
        return Err(ApiError::bad_request("identity required"));
    }
    let form = read_form(multipart, DOCUMENT_FIELD).await?;

    let fields = validate_kyc_fields(
        form.field("residential_address"),
        form.field("work_address"),
    )
    .map_err(ApiError::Validation)?;

    let record = state
        .pipeline
        .submit_kyc(&identity, fields, form.upload)
        .await?;

    info!(identity = %identity, document = %record.identity_doc, "kyc details recorded");
    Ok(Json(KycResponse::new(record)))
}
