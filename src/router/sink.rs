use async_trait::async_trait;

use super::records::{AuditRecord, TicketRecord};
use crate::errors::ProvexError;

/// Append-only destination for validated-exploitable ticket records.
/// Implementations must tolerate concurrent use; appends are atomic
/// with respect to each other and preserve call order.
#[async_trait]
pub trait TicketSink: Send + Sync {
    async fn append(&self, record: &TicketRecord) -> Result<(), ProvexError>;
}

/// Append-only destination for not-exploitable audit records. Same
/// concurrency contract as [`TicketSink`].
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn append(&self, record: &AuditRecord) -> Result<(), ProvexError>;
}
