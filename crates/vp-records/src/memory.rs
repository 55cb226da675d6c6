//! In-memory adapters for tests and development.

use crate::entities::{AuditEntry, Identity, KycRecord, UserRecord};
use crate::errors::RecordsError;
use crate::ports::{AuditLog, KycRecords, UserRecords};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use vp_media_store::AssetRef;

/// In-memory user records with an atomic compare-and-swap on the photo
/// reference. The DashMap entry guard holds the shard lock for the duration
/// of the check-then-write, which is what makes the CAS atomic.
#[derive(Default)]
pub struct InMemoryUserRecords {
    users: DashMap<String, UserRecord>,
}

impl InMemoryUserRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user (test/dev helper; not part of the port).
    pub fn insert(&self, record: UserRecord) {
        self.users.insert(record.id.as_str().to_string(), record);
    }
}

#[async_trait]
impl UserRecords for InMemoryUserRecords {
    async fn find(&self, id: &Identity) -> Result<Option<UserRecord>, RecordsError> {
        Ok(self.users.get(id.as_str()).map(|r| r.clone()))
    }

    async fn replace_profile_pic(
        &self,
        id: &Identity,
        expected: Option<&AssetRef>,
        new: &AssetRef,
    ) -> Result<(), RecordsError> {
        let mut record = self
            .users
            .get_mut(id.as_str())
            .ok_or(RecordsError::NotFound)?;
        if record.profile_pic.as_ref() != expected {
            return Err(RecordsError::Conflict);
        }
        record.profile_pic = Some(new.clone());
        Ok(())
    }
}

/// In-memory KYC records. Policy decision for this adapter: a second
/// submission for the same identity is rejected with `AlreadyExists`.
#[derive(Default)]
pub struct InMemoryKycRecords {
    records: DashMap<String, KycRecord>,
}

impl InMemoryKycRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a submission (test helper; not part of the port).
    pub fn find_by_owner(&self, id: &Identity) -> Option<KycRecord> {
        self.records.get(id.as_str()).map(|r| r.clone())
    }
}

#[async_trait]
impl KycRecords for InMemoryKycRecords {
    async fn insert(&self, record: KycRecord) -> Result<(), RecordsError> {
        use dashmap::mapref::entry::Entry;
        match self.records.entry(record.owner.as_str().to_string()) {
            Entry::Occupied(_) => Err(RecordsError::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }
}

/// In-memory audit log with injectable failure, so tests can prove the
/// emitter never lets an audit fault reach the primary response.
#[derive(Default)]
pub struct InMemoryAuditLog {
    entries: Mutex<Vec<AuditEntry>>,
    fail: AtomicBool,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `append` fail.
    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of the recorded entries.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().expect("audit log lock").clone()
    }
}

#[async_trait]
impl AuditLog for InMemoryAuditLog {
    async fn append(&self, entry: AuditEntry) -> Result<(), RecordsError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RecordsError::Unavailable("injected audit failure".into()));
        }
        self.entries.lock().expect("audit log lock").push(entry);
        Ok(())
    }
}
