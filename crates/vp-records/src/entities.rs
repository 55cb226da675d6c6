//! Record entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use vp_media_store::AssetRef;

/// Opaque user key, supplied by the external authentication collaborator.
///
/// The pipeline trusts it as a precondition and only re-checks presence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A platform user, as seen by this pipeline.
///
/// The pipeline exclusively owns the write path for `profile_pic`; every
/// other field is read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Identity,
    pub email: String,
    pub full_name: String,
    /// Reference to the current profile photo, if one was ever uploaded.
    pub profile_pic: Option<AssetRef>,
}

/// One KYC submission. Created once per successful submission and immutable
/// afterwards; there is no update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycRecord {
    pub owner: Identity,
    pub residential_address: String,
    pub work_address: String,
    /// Reference to the stored identity document.
    pub identity_doc: AssetRef,
    pub submitted_at: DateTime<Utc>,
}

/// One append-only activity record. Never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Human-readable description of what changed.
    pub activity: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_email: Option<String>,
}

impl AuditEntry {
    /// Entry stamped with the current time and no actor details.
    pub fn new(activity: impl Into<String>) -> Self {
        Self {
            activity: activity.into(),
            timestamp: Utc::now(),
            actor_name: None,
            actor_email: None,
        }
    }

    /// Attach the acting user's display details.
    pub fn with_actor(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.actor_name = Some(name.into());
        self.actor_email = Some(email.into());
        self
    }
}
