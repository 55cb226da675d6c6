//! Response envelopes.
//!
//! Every body carries a `status` code string: `"00"` for success, `"E00"`
//! for any failure. Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::Serialize;
use vp_media_store::AssetRef;
use vp_records::KycRecord;

use crate::sanitize::FieldError;

/// Status code carried by every successful body.
pub const STATUS_OK: &str = "00";
/// Status code carried by every error body.
pub const STATUS_ERR: &str = "E00";

/// Successful profile photo replacement.
#[derive(Debug, Serialize)]
pub struct ProfilePhotoResponse {
    pub status: &'static str,
    pub success: bool,
    pub message: String,
    pub data: ProfilePhotoData,
}

#[derive(Debug, Serialize)]
pub struct ProfilePhotoData {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "profilePic")]
    pub profile_pic: AssetRef,
}

impl ProfilePhotoResponse {
    pub fn new(user_id: impl Into<String>, profile_pic: AssetRef) -> Self {
        Self {
            status: STATUS_OK,
            success: true,
            message: "Profile pic updated".to_string(),
            data: ProfilePhotoData {
                user_id: user_id.into(),
                profile_pic,
            },
        }
    }
}

/// Successful KYC submission.
#[derive(Debug, Serialize)]
pub struct KycResponse {
    pub status: &'static str,
    pub success: bool,
    pub message: String,
    #[serde(rename = "kycDetails")]
    pub kyc_details: KycDetails,
}

#[derive(Debug, Serialize)]
pub struct KycDetails {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "residentialAddress")]
    pub residential_address: String,
    #[serde(rename = "workAddress")]
    pub work_address: String,
    #[serde(rename = "identityUrl")]
    pub identity_url: AssetRef,
    #[serde(rename = "submittedAt")]
    pub submitted_at: DateTime<Utc>,
}

impl KycResponse {
    pub fn new(record: KycRecord) -> Self {
        Self {
            status: STATUS_OK,
            success: true,
            message: "Kyc details added successfully".to_string(),
            kyc_details: KycDetails {
                user_id: record.owner.to_string(),
                residential_address: record.residential_address,
                work_address: record.work_address,
                identity_url: record.identity_doc,
                submitted_at: record.submitted_at,
            },
        }
    }
}

/// Generic error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERR,
            success: false,
            message: message.into(),
        }
    }
}

/// Field-level validation failure body.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub status: &'static str,
    pub errors: Vec<FieldError>,
}

impl ValidationResponse {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self {
            status: STATUS_ERR,
            errors,
        }
    }
}
