//! Error types for record-store and audit-log operations.

use thiserror::Error;

/// Failures surfaced by the record-store and audit-log ports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordsError {
    /// The identity has no backing record.
    #[error("record not found")]
    NotFound,

    /// A conditional write lost to a concurrent writer: the record's current
    /// value no longer matches what the caller read.
    #[error("concurrent update conflict")]
    Conflict,

    /// A record for this identity already exists and the adapter's policy is
    /// to reject duplicates.
    #[error("record already exists")]
    AlreadyExists,

    /// The backing store cannot be reached or failed the operation.
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}
