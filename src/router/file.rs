use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::records::{AuditRecord, TicketRecord};
use super::sink::{AuditSink, TicketSink};
use crate::errors::ProvexError;

/// One JSON object per line, appended under a lock so concurrent
/// pipeline workers cannot interleave records.
struct JsonlFile {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonlFile {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    async fn append<T: Serialize>(&self, record: &T) -> Result<(), ProvexError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let _guard = self.lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

/// Ticket sink backed by a `tickets.jsonl` style file.
pub struct JsonlTicketSink {
    file: JsonlFile,
}

impl JsonlTicketSink {
    pub fn new(path: &Path) -> Self {
        Self {
            file: JsonlFile::new(path),
        }
    }
}

#[async_trait]
impl TicketSink for JsonlTicketSink {
    async fn append(&self, record: &TicketRecord) -> Result<(), ProvexError> {
        self.file.append(record).await
    }
}

/// Audit sink backed by an `audit.jsonl` style file.
pub struct JsonlAuditSink {
    file: JsonlFile,
}

impl JsonlAuditSink {
    pub fn new(path: &Path) -> Self {
        Self {
            file: JsonlFile::new(path),
        }
    }
}

#[async_trait]
impl AuditSink for JsonlAuditSink {
    async fn append(&self, record: &AuditRecord) -> Result<(), ProvexError> {
        self.file.append(record).await
    }
}
