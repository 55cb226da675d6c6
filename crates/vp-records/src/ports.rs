//! # Outbound Ports (Driven Ports)
//!
//! Interfaces the upload pipeline requires the host's persistence layer to
//! implement. Production adapters live with the host application; the
//! in-memory adapters in [`crate::memory`] back tests and development runs.

use crate::entities::{AuditEntry, Identity, KycRecord, UserRecord};
use crate::errors::RecordsError;
use async_trait::async_trait;
use vp_media_store::AssetRef;

/// User-record access, scoped to what the pipeline actually needs: a lookup
/// and one atomic conditional write.
#[async_trait]
pub trait UserRecords: Send + Sync {
    /// Resolve an identity to its record, if any.
    async fn find(&self, id: &Identity) -> Result<Option<UserRecord>, RecordsError>;

    /// Compare-and-swap the record's profile photo reference.
    ///
    /// Succeeds only if the record's current reference still equals
    /// `expected` (which may be `None` for a user with no photo yet).
    /// A losing concurrent writer gets [`RecordsError::Conflict`] and MUST
    /// NOT delete the asset it read as "old" — the winner still needs it.
    async fn replace_profile_pic(
        &self,
        id: &Identity,
        expected: Option<&AssetRef>,
        new: &AssetRef,
    ) -> Result<(), RecordsError>;
}

/// KYC-record creation. There is no update path: a record is written once.
///
/// Whether a second submission for the same identity is rejected, upserted,
/// or duplicated is the adapter's policy, not the pipeline's.
#[async_trait]
pub trait KycRecords: Send + Sync {
    async fn insert(&self, record: KycRecord) -> Result<(), RecordsError>;
}

/// Append-only activity log. Entries are never mutated or deleted.
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn append(&self, entry: AuditEntry) -> Result<(), RecordsError>;
}
