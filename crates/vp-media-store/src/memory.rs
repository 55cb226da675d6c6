//! In-memory media store for unit and integration tests.

use crate::error::StoreError;
use crate::store::{object_key, AssetRef, DeleteOutcome, IncomingUpload, MediaStore, StoreConstraints};
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Call-counting in-memory backend with programmable failure.
///
/// Lets tests assert the orchestrator's ordering guarantees: how many times
/// `store`/`delete` ran, whether bytes survived, and how the pipeline reacts
/// when the backend goes away mid-flight.
#[derive(Default)]
pub struct InMemoryMediaStore {
    objects: DashMap<String, Bytes>,
    store_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    fail_store: AtomicBool,
    fail_delete: AtomicBool,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `store` fail with `Unavailable`.
    pub fn fail_store(&self, fail: bool) {
        self.fail_store.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `delete` fail with `Unavailable`.
    pub fn fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn store_calls(&self) -> usize {
        self.store_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    /// Whether an object currently exists at the reference.
    pub fn contains(&self, reference: &AssetRef) -> bool {
        self.objects.contains_key(reference.as_str())
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn store(
        &self,
        upload: &IncomingUpload,
        constraints: &StoreConstraints,
    ) -> Result<AssetRef, StoreError> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_store.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected store failure".into()));
        }
        constraints.check(upload)?;

        let key = object_key("uploads", &upload.file_name);
        self.objects.insert(key.clone(), upload.bytes.clone());
        Ok(AssetRef::new(key))
    }

    async fn delete(&self, reference: &AssetRef) -> Result<DeleteOutcome, StoreError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected delete failure".into()));
        }
        match self.objects.remove(reference.as_str()) {
            Some(_) => Ok(DeleteOutcome::Deleted),
            None => Ok(DeleteOutcome::NotFound),
        }
    }
}
