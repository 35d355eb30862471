use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Finding;

/// Ticket-sink contract: one append-only record per validated
/// exploitable finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketRecord {
    pub timestamp: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub severity: String,
    pub host: String,
    pub port: Option<u16>,
    pub status: String,
}

impl TicketRecord {
    pub fn from_finding(finding: &Finding, decision_reason: &str) -> Self {
        let description = format!(
            "Vulnerability Details:\n\
             - Scanner: {}\n\
             - Host: {}\n\
             - Port: {}\n\
             - Severity: {}\n\
             - Finding: {}\n\
             - Summary: {}\n\
             \n\
             Validation Decision:\n\
             {}\n\
             \n\
             Action Required: This vulnerability has been validated as exploitable and requires immediate attention.",
            finding.scanner,
            finding.host,
            finding
                .port
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            finding.severity,
            finding.finding,
            finding.summary,
            decision_reason,
        );

        Self {
            timestamp: Utc::now(),
            title: format!("[EXPLOITABLE] {}", finding.finding),
            description,
            severity: finding.severity.clone(),
            host: finding.host.clone(),
            port: finding.port,
            status: "exploitable".to_string(),
        }
    }
}

/// Audit-sink contract: one append-only record per finding validated as
/// not exploitable (including the unparsed-decision fallback).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub timestamp: DateTime<Utc>,
    pub scanner: String,
    pub host: String,
    pub port: Option<u16>,
    pub finding: String,
    pub severity: String,
    pub decision: String,
    pub status: String,
}

impl AuditRecord {
    pub fn from_finding(finding: &Finding, decision_reason: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            scanner: finding.scanner.clone(),
            host: finding.host.clone(),
            port: finding.port,
            finding: finding.finding.clone(),
            severity: finding.severity.clone(),
            decision: decision_reason.to_string(),
            status: "not_exploitable".to_string(),
        }
    }
}
