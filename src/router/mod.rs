pub mod file;
pub mod memory;
pub mod records;
pub mod sink;

use std::sync::Arc;

use tracing::{info, warn};

use crate::models::{Decision, Finding};

pub use file::{JsonlAuditSink, JsonlTicketSink};
pub use memory::{MemoryAuditSink, MemoryTicketSink};
pub use records::{AuditRecord, TicketRecord};
pub use sink::{AuditSink, TicketSink};

/// Where a finding's record was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    Ticket,
    Audit,
}

/// Dispatches each decided finding to exactly one sink: exploitable
/// findings become tickets, everything else becomes an audit entry.
/// Sink writes are best-effort: a failed append is logged for the
/// operator and never aborts the pipeline.
pub struct DecisionRouter {
    ticket_sink: Arc<dyn TicketSink>,
    audit_sink: Arc<dyn AuditSink>,
}

impl DecisionRouter {
    pub fn new(ticket_sink: Arc<dyn TicketSink>, audit_sink: Arc<dyn AuditSink>) -> Self {
        Self {
            ticket_sink,
            audit_sink,
        }
    }

    pub async fn route(&self, finding: &Finding, decision: &Decision) -> RouteTarget {
        if decision.exploitable.is_exploitable() {
            let ticket = TicketRecord::from_finding(finding, &decision.reason);
            info!(
                title = %ticket.title,
                target = %finding.target(),
                severity = %finding.severity,
                "Exploitable, ticket created"
            );
            if let Err(e) = self.ticket_sink.append(&ticket).await {
                warn!(error = %e, "Ticket sink write failed");
            }
            RouteTarget::Ticket
        } else {
            let entry = AuditRecord::from_finding(finding, &decision.reason);
            info!(finding = %finding.finding, "Not exploitable, logged");
            if let Err(e) = self.audit_sink.append(&entry).await {
                warn!(error = %e, "Audit sink write failed");
            }
            RouteTarget::Audit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ProvexError;
    use crate::models::{Decision, Exploitable};

    fn finding() -> Finding {
        Finding {
            scanner: "Nessus".to_string(),
            host: "192.168.1.50".to_string(),
            port: Some(443),
            protocol: Some("https".to_string()),
            finding: "SQL Injection in Login Form".to_string(),
            severity: "CRITICAL".to_string(),
            summary: "Login form vulnerable to injection".to_string(),
        }
    }

    fn router_with_memory() -> (DecisionRouter, Arc<MemoryTicketSink>, Arc<MemoryAuditSink>) {
        let tickets = Arc::new(MemoryTicketSink::default());
        let audit = Arc::new(MemoryAuditSink::default());
        (
            DecisionRouter::new(tickets.clone(), audit.clone()),
            tickets,
            audit,
        )
    }

    #[tokio::test]
    async fn test_exploitable_goes_to_ticket_sink_only() {
        let (router, tickets, audit) = router_with_memory();
        let decision = Decision {
            exploitable: Exploitable::Yes,
            reason: "sentinel success".to_string(),
        };

        let target = router.route(&finding(), &decision).await;

        assert_eq!(target, RouteTarget::Ticket);
        assert_eq!(tickets.records().await.len(), 1);
        assert!(audit.records().await.is_empty());

        let ticket = &tickets.records().await[0];
        assert_eq!(ticket.status, "exploitable");
        assert!(ticket.title.contains("SQL Injection in Login Form"));
        assert!(ticket.description.contains("sentinel success"));
        assert_eq!(ticket.host, "192.168.1.50");
        assert_eq!(ticket.port, Some(443));
    }

    struct FailingTicketSink;

    #[async_trait::async_trait]
    impl TicketSink for FailingTicketSink {
        async fn append(&self, _record: &TicketRecord) -> Result<(), ProvexError> {
            Err(ProvexError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )))
        }
    }

    struct FailingAuditSink;

    #[async_trait::async_trait]
    impl AuditSink for FailingAuditSink {
        async fn append(&self, _record: &AuditRecord) -> Result<(), ProvexError> {
            Err(ProvexError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )))
        }
    }

    #[tokio::test]
    async fn test_sink_write_failure_is_swallowed() {
        let router = DecisionRouter::new(Arc::new(FailingTicketSink), Arc::new(FailingAuditSink));

        let yes = Decision {
            exploitable: Exploitable::Yes,
            reason: "r".to_string(),
        };
        assert_eq!(router.route(&finding(), &yes).await, RouteTarget::Ticket);

        let no = Decision {
            exploitable: Exploitable::No,
            reason: "r".to_string(),
        };
        assert_eq!(router.route(&finding(), &no).await, RouteTarget::Audit);
    }

    #[tokio::test]
    async fn test_not_exploitable_goes_to_audit_sink_only() {
        let (router, tickets, audit) = router_with_memory();
        let decision = Decision {
            exploitable: Exploitable::No,
            reason: "failure sentinel".to_string(),
        };

        let target = router.route(&finding(), &decision).await;

        assert_eq!(target, RouteTarget::Audit);
        assert!(tickets.records().await.is_empty());
        let entries = audit.records().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, "not_exploitable");
        assert_eq!(entries[0].scanner, "Nessus");
        assert_eq!(entries[0].decision, "failure sentinel");
    }
}
