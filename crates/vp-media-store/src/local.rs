//! Local-filesystem storage backend.

use crate::error::StoreError;
use crate::store::{object_key, AssetRef, DeleteOutcome, IncomingUpload, MediaStore, StoreConstraints};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

/// Filesystem-backed media store.
///
/// Objects live under `root/<prefix>/...` and are referenced by the relative
/// key (e.g. `uploads/1730000000000-a.png`), so the same reference works as
/// a URL path when the directory is served statically.
///
/// Durability: bytes are written to a temp file, `sync_all`'d, then renamed
/// into place. A crash mid-store leaves at worst an orphaned `.part` file,
/// never a half-written object at a live reference.
pub struct LocalDiskStore {
    root: PathBuf,
    prefix: String,
}

impl LocalDiskStore {
    /// Create a store rooted at `root`, issuing keys under `prefix`.
    pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into(),
        }
    }

    /// Resolve a reference to a path under the root.
    ///
    /// Rejects references with parent/absolute components or outside the
    /// issued prefix: the adapter only deletes what it could have created.
    fn resolve(&self, reference: &AssetRef) -> Result<PathBuf, StoreError> {
        let rel = Path::new(reference.as_str());
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        // The prefix must match as a whole path segment: `uploads-evil/x`
        // is not under the prefix `uploads`.
        let prefix_dir = format!("{}/", self.prefix.trim_end_matches('/'));
        if escapes || !reference.as_str().starts_with(&prefix_dir) {
            return Err(StoreError::InvalidReference(reference.to_string()));
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait]
impl MediaStore for LocalDiskStore {
    async fn store(
        &self,
        upload: &IncomingUpload,
        constraints: &StoreConstraints,
    ) -> Result<AssetRef, StoreError> {
        constraints.check(upload)?;

        let key = object_key(&self.prefix, &upload.file_name);
        let path = self.root.join(&key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write atomically via temp file in the same directory.
        let tmp = path.with_extension(format!("{}.part", Uuid::new_v4()));
        let mut file = fs::File::create(&tmp).await?;
        file.write_all(&upload.bytes).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&tmp, &path).await?;

        debug!(key = %key, size = upload.bytes.len(), "stored media object");
        Ok(AssetRef::new(key))
    }

    async fn delete(&self, reference: &AssetRef) -> Result<DeleteOutcome, StoreError> {
        let path = self.resolve(reference)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(reference = %reference, "deleted media object");
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DeleteOutcome::NotFound),
            Err(e) => Err(e.into()),
        }
    }
}
