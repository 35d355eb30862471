use async_trait::async_trait;
use tokio::sync::Mutex;

use super::records::{AuditRecord, TicketRecord};
use super::sink::{AuditSink, TicketSink};
use crate::errors::ProvexError;

/// In-memory ticket sink for tests and dry runs.
#[derive(Default)]
pub struct MemoryTicketSink {
    records: Mutex<Vec<TicketRecord>>,
}

impl MemoryTicketSink {
    pub async fn records(&self) -> Vec<TicketRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl TicketSink for MemoryTicketSink {
    async fn append(&self, record: &TicketRecord) -> Result<(), ProvexError> {
        self.records.lock().await.push(record.clone());
        Ok(())
    }
}

/// In-memory audit sink for tests and dry runs.
#[derive(Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    pub async fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn append(&self, record: &AuditRecord) -> Result<(), ProvexError> {
        self.records.lock().await.push(record.clone());
        Ok(())
    }
}
