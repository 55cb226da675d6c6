//! # Veriport API
//!
//! HTTP surface for the user platform's media pipeline: profile photo
//! replacement and KYC document intake.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        VP-API                                │
//! ├──────────────────────────────────────────────────────────────┤
//! │  POST /profile/photo      POST /kyc         GET /health      │
//! │        │                       │                             │
//! │  ┌─────┴───────────────────────┴──────┐                      │
//! │  │        Auth middleware             │ → 401                │
//! │  │  (IdentityVerifier port)           │                      │
//! │  └─────┬───────────────────────┬──────┘                      │
//! │        │                       │                             │
//! │  ┌─────┴───────────────────────┴──────┐                      │
//! │  │       Request contract layer       │ → 400                │
//! │  │ (multipart, field validation)      │                      │
//! │  └─────┬───────────────────────┬──────┘                      │
//! │        │                       │                             │
//! │  ┌─────┴───────────────────────┴──────┐   ┌───────────────┐  │
//! │  │        AssetPipeline               │──→│ AuditEmitter  │  │
//! │  │ validate → store → commit → retire │   │ (best-effort) │  │
//! │  └─────┬──────────────┬───────────────┘   └───────┬───────┘  │
//! └────────┼──────────────┼───────────────────────────┼──────────┘
//!          ↓              ↓                           ↓
//!     MediaStore      UserRecords/KycRecords      AuditLog
//!     (vp-media-store)         (vp-records ports)
//! ```
//!
//! ## Failure ordering
//!
//! The pipeline is the single point where every fallible step is sequenced.
//! The record commit always happens before the stale asset is deleted, so
//! the record never points at a file that no longer exists. Audit emission
//! runs only after the commit and its failure never reaches the response.

pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod pipeline;
pub mod router;
pub mod sanitize;
pub mod service;

pub use domain::config::{ApiConfig, ConfigError, StorageBackendKind};
pub use domain::error::{ApiError, ServiceError};
pub use middleware::auth::{AuthLayer, IdentityVerifier, StaticTokenVerifier};
pub use pipeline::{AssetPipeline, AuditEmitter, PipelineError};
pub use router::{build_router, AppState};
pub use service::ApiService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
