//! Best-effort audit trail emitter.

use std::sync::Arc;
use tracing::warn;
use vp_records::{AuditEntry, AuditLog};

/// Fire-and-forget writer for the append-only activity log.
///
/// Emission runs on its own task, after the primary state transition has
/// already committed. An append failure is logged and dropped; it never
/// rolls back or delays the response the caller has already earned.
#[derive(Clone)]
pub struct AuditEmitter {
    log: Arc<dyn AuditLog>,
}

impl AuditEmitter {
    pub fn new(log: Arc<dyn AuditLog>) -> Self {
        Self { log }
    }

    /// Queue one entry for appending.
    pub fn emit(&self, entry: AuditEntry) {
        let log = Arc::clone(&self.log);
        tokio::spawn(async move {
            if let Err(e) = log.append(entry).await {
                warn!(error = %e, "audit append failed; primary operation unaffected");
            }
        });
    }
}
