//! # Records
//!
//! Driven ports for the platform's durable records: user profiles, KYC
//! submissions, and the append-only audit trail.
//!
//! The persistence layer itself (schema, indexing, the actual database) is an
//! external collaborator. This crate defines the interfaces the upload
//! pipeline requires the host to implement, plus in-memory adapters used by
//! tests and development runs.
//!
//! ## The one invariant that matters here
//!
//! [`UserRecords::replace_profile_pic`] is a single atomic conditional write:
//! it swaps the record's current photo reference only if it still equals the
//! value the caller read. Two racing replacements for the same user cannot
//! both "win", so the pipeline never deletes an asset the record still
//! points at.

pub mod entities;
pub mod errors;
pub mod memory;
pub mod ports;

pub use entities::{AuditEntry, Identity, KycRecord, UserRecord};
pub use errors::RecordsError;
pub use memory::{InMemoryAuditLog, InMemoryKycRecords, InMemoryUserRecords};
pub use ports::{AuditLog, KycRecords, UserRecords};
