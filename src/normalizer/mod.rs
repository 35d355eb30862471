use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::ProvexError;
use crate::models::finding::{Finding, SUMMARY_LIMIT};
use crate::utils::truncate_chars;

/// Raw report shape. The field names are the external contract with the
/// scanner integrations; renaming any of them breaks compatibility.
#[derive(Debug, Deserialize)]
struct RawReport {
    #[serde(default)]
    scan: RawScanMeta,
    #[serde(default)]
    hosts: Vec<RawHost>,
}

#[derive(Debug, Default, Deserialize)]
struct RawScanMeta {
    scanner: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawHost {
    hostname: Option<String>,
    ip: Option<String>,
    #[serde(default)]
    vulnerabilities: Vec<RawVulnerability>,
}

#[derive(Debug, Deserialize)]
struct RawVulnerability {
    port: Option<u16>,
    protocol: Option<String>,
    plugin_name: Option<String>,
    severity: Option<String>,
    description: Option<String>,
}

/// Normalize a raw scanner report into findings, one per vulnerability
/// entry, preserving host-then-vulnerability order. Nothing is dropped
/// or merged. A structurally bad report or an absent description is
/// fatal: no findings from it can be trusted.
pub fn normalize_report(raw: &Value) -> Result<Vec<Finding>, ProvexError> {
    let report: RawReport = serde_json::from_value(raw.clone())
        .map_err(|e| ProvexError::MalformedInput(e.to_string()))?;

    let scanner = report
        .scan
        .scanner
        .unwrap_or_else(|| "unknown".to_string());

    let mut findings = Vec::new();
    for host in report.hosts {
        let host_name = host.hostname.or(host.ip).ok_or_else(|| {
            ProvexError::MalformedInput("host entry carries neither hostname nor ip".into())
        })?;

        for vuln in host.vulnerabilities {
            let description = vuln.description.ok_or_else(|| {
                ProvexError::MalformedInput(format!(
                    "vulnerability on {} is missing its description",
                    host_name
                ))
            })?;

            findings.push(Finding {
                scanner: scanner.clone(),
                host: host_name.clone(),
                port: vuln.port,
                protocol: vuln.protocol,
                finding: vuln.plugin_name.unwrap_or_default(),
                severity: vuln.severity.unwrap_or_default(),
                summary: truncate_chars(&description, SUMMARY_LIMIT),
            });
        }
    }

    debug!(count = findings.len(), scanner = %scanner, "Normalized scanner report");
    Ok(findings)
}
