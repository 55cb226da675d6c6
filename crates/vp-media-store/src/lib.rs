//! # Media Store
//!
//! Storage backend adapter for uploaded media assets (profile photos and
//! KYC identity documents).
//!
//! The rest of the platform never touches the filesystem or an object-storage
//! API directly. Everything goes through the [`MediaStore`] port:
//!
//! ```text
//!                      ┌────────────────────┐
//!  upload handler ────→│  MediaStore (port) │
//!                      └─────────┬──────────┘
//!                ┌───────────────┼────────────────┐
//!                ↓               ↓                ↓
//!         LocalDiskStore   HttpObjectStore   InMemoryMediaStore
//!         (tokio::fs)      (remote, HTTP)    (tests)
//! ```
//!
//! ## Guarantees
//!
//! - `store` returns only after the bytes are durably retrievable at the
//!   returned [`AssetRef`] (local adapter: temp file + `sync_all` + rename).
//! - `delete` is idempotent: a missing object is [`DeleteOutcome::NotFound`],
//!   never an error.
//! - Format policy is enforced twice: callers run [`format::validate_upload`]
//!   before handing bytes over, and every adapter re-checks its
//!   [`StoreConstraints`].

pub mod error;
pub mod format;
pub mod local;
pub mod memory;
pub mod remote;
pub mod store;

pub use error::{FormatError, StoreError};
pub use format::{validate_upload, ImageFormat};
pub use local::LocalDiskStore;
pub use memory::InMemoryMediaStore;
pub use remote::HttpObjectStore;
pub use store::{AssetRef, DeleteOutcome, IncomingUpload, MediaStore, StoreConstraints};
