//! Asset replacement orchestrator.
//!
//! The only component allowed to mutate the "current asset" pointer. It
//! sequences every fallible step of an upload:
//!
//! 1. resolve the owning record
//! 2. require a file part
//! 3. validate the declared format (no side effects on rejection)
//! 4. store the bytes through the backend (no record mutation on failure)
//! 5. commit the new reference with an atomic compare-and-swap
//! 6. only then retire the replaced asset (failure tolerated, logged)
//! 7. emit an audit entry (best-effort, after commit)
//!
//! A losing concurrent writer re-reads the fresh reference and retries the
//! CAS, so the asset it eventually deletes is always the one it actually
//! replaced. It never deletes an asset the record still points at.

pub mod audit;

pub use audit::AuditEmitter;

use std::sync::Arc;
use thiserror::Error;
use tracing::warn;
use vp_media_store::{
    validate_upload, AssetRef, FormatError, IncomingUpload, MediaStore, StoreConstraints,
    StoreError,
};
use vp_records::{
    AuditEntry, Identity, KycRecord, KycRecords, RecordsError, UserRecords,
};

use crate::sanitize::KycFields;

/// CAS attempts before giving up on a heavily contended record.
const MAX_COMMIT_ATTEMPTS: usize = 3;

/// Failures surfaced by the pipeline. All terminal for the request; the
/// pipeline never retries on the caller's behalf beyond the CAS loop.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The identity has no backing record.
    #[error("user record not found")]
    RecordNotFound,

    /// No file part was supplied with the request.
    #[error("no file uploaded")]
    MissingFile,

    /// The upload failed format validation; nothing was stored.
    #[error("{0}")]
    RejectedFormat(FormatError),

    /// A record for this identity already exists (KYC duplicate policy).
    #[error("a KYC record already exists for this user")]
    AlreadyExists,

    /// The commit lost the CAS race repeatedly; the stored asset was
    /// reclaimed and nothing user-visible changed.
    #[error("record update lost a concurrent-write race")]
    Contended,

    /// Storage backend fault.
    #[error(transparent)]
    Storage(StoreError),

    /// Record store fault.
    #[error("record store fault: {0}")]
    Records(RecordsError),
}

impl From<StoreError> for PipelineError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UnsupportedFormat(f) => PipelineError::RejectedFormat(f),
            other => PipelineError::Storage(other),
        }
    }
}

impl From<RecordsError> for PipelineError {
    fn from(e: RecordsError) -> Self {
        match e {
            RecordsError::NotFound => PipelineError::RecordNotFound,
            RecordsError::AlreadyExists => PipelineError::AlreadyExists,
            other => PipelineError::Records(other),
        }
    }
}

/// The store → commit → retire orchestrator.
pub struct AssetPipeline {
    media: Arc<dyn MediaStore>,
    users: Arc<dyn UserRecords>,
    kyc: Arc<dyn KycRecords>,
    audit: AuditEmitter,
    constraints: StoreConstraints,
}

impl AssetPipeline {
    pub fn new(
        media: Arc<dyn MediaStore>,
        users: Arc<dyn UserRecords>,
        kyc: Arc<dyn KycRecords>,
        audit: AuditEmitter,
        constraints: StoreConstraints,
    ) -> Self {
        Self {
            media,
            users,
            kyc,
            audit,
            constraints,
        }
    }

    /// Replace the user's profile photo with the uploaded file.
    ///
    /// Returns the committed reference. On any failure before the commit the
    /// old reference (or its absence) is preserved exactly.
    pub async fn replace_profile_photo(
        &self,
        identity: &Identity,
        upload: Option<IncomingUpload>,
    ) -> Result<AssetRef, PipelineError> {
        let user = self
            .users
            .find(identity)
            .await?
            .ok_or(PipelineError::RecordNotFound)?;

        let upload = upload.ok_or(PipelineError::MissingFile)?;

        // Gate the format before any bytes reach the backend.
        validate_upload(&upload.file_name, &upload.content_type, &self.constraints.allowed)
            .map_err(PipelineError::RejectedFormat)?;

        let new_ref = self.media.store(&upload, &self.constraints).await?;

        // Commit before delete: the record must never point at a file that
        // is already gone.
        let replaced = match self.commit_photo(identity, user.profile_pic, &new_ref).await {
            Ok(replaced) => replaced,
            Err(e) => {
                // The record was not mutated; reclaim our own stored bytes
                // so the failure leaves nothing behind.
                self.reclaim(&new_ref).await;
                return Err(e);
            }
        };

        if let Some(old_ref) = replaced {
            self.retire(&old_ref).await;
        }

        self.audit.emit(
            AuditEntry::new(format!("Profile photo updated by user {identity}"))
                .with_actor(user.full_name, user.email),
        );

        Ok(new_ref)
    }

    /// Record a KYC submission: addresses plus the stored identity document.
    ///
    /// There is no replacement path; duplicate-submission policy belongs to
    /// the `KycRecords` adapter.
    pub async fn submit_kyc(
        &self,
        identity: &Identity,
        fields: KycFields,
        upload: Option<IncomingUpload>,
    ) -> Result<KycRecord, PipelineError> {
        let upload = upload.ok_or(PipelineError::MissingFile)?;

        validate_upload(&upload.file_name, &upload.content_type, &self.constraints.allowed)
            .map_err(PipelineError::RejectedFormat)?;

        let identity_doc = self.media.store(&upload, &self.constraints).await?;

        let record = KycRecord {
            owner: identity.clone(),
            residential_address: fields.residential_address,
            work_address: fields.work_address,
            identity_doc: identity_doc.clone(),
            submitted_at: chrono::Utc::now(),
        };

        if let Err(e) = self.kyc.insert(record.clone()).await {
            self.reclaim(&identity_doc).await;
            return Err(e.into());
        }

        self.audit
            .emit(AuditEntry::new(format!("Kyc details added by user {identity}")));

        Ok(record)
    }

    /// CAS loop for the photo commit. Returns the reference that was
    /// actually replaced (read fresh on every retry), or an error if the
    /// record vanished or contention never resolved.
    async fn commit_photo(
        &self,
        identity: &Identity,
        first_read: Option<AssetRef>,
        new_ref: &AssetRef,
    ) -> Result<Option<AssetRef>, PipelineError> {
        let mut expected = first_read;
        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            match self
                .users
                .replace_profile_pic(identity, expected.as_ref(), new_ref)
                .await
            {
                Ok(()) => return Ok(expected),
                Err(RecordsError::Conflict) => {
                    warn!(
                        identity = %identity,
                        attempt,
                        "photo commit lost CAS race; re-reading current reference"
                    );
                    expected = self
                        .users
                        .find(identity)
                        .await?
                        .ok_or(PipelineError::RecordNotFound)?
                        .profile_pic;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(PipelineError::Contended)
    }

    /// Delete a superseded asset. The record already points at the new one,
    /// so a failure here is a storage leak for an external sweep to
    /// reconcile, not a request failure.
    async fn retire(&self, old_ref: &AssetRef) {
        if let Err(e) = self.media.delete(old_ref).await {
            warn!(
                reference = %old_ref,
                error = %e,
                "failed to delete replaced asset; leaving for reconciliation"
            );
        }
    }

    /// Best-effort cleanup of an asset this request stored but never
    /// committed.
    async fn reclaim(&self, reference: &AssetRef) {
        if let Err(e) = self.media.delete(reference).await {
            warn!(
                reference = %reference,
                error = %e,
                "failed to reclaim uncommitted asset"
            );
        }
    }
}
