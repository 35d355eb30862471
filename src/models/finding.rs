use serde::{Deserialize, Serialize};

/// Maximum number of characters carried over from a scanner description.
pub const SUMMARY_LIMIT: usize = 300;

/// A single normalized vulnerability record derived from a raw scanner
/// report. Created once by the normalizer, read-only downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Source tool identifier, `"unknown"` if the report carried none.
    pub scanner: String,
    /// Hostname if present, otherwise IP.
    pub host: String,
    pub port: Option<u16>,
    pub protocol: Option<String>,
    /// Plugin/check name. May be empty, never absent.
    pub finding: String,
    /// Free-form severity, case preserved until display.
    pub severity: String,
    /// Description truncated to [`SUMMARY_LIMIT`] characters.
    pub summary: String,
}

impl Finding {
    /// `host:port` for display, or just the host when no port is known.
    pub fn target(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Finding {
        Finding {
            scanner: "Nessus".to_string(),
            host: "192.168.1.50".to_string(),
            port: Some(443),
            protocol: Some("https".to_string()),
            finding: "Weak SSL/TLS Configuration".to_string(),
            severity: "MEDIUM".to_string(),
            summary: "Server supports weak cipher suites".to_string(),
        }
    }

    #[test]
    fn test_target_with_port() {
        assert_eq!(sample().target(), "192.168.1.50:443");
    }

    #[test]
    fn test_target_without_port() {
        let mut f = sample();
        f.port = None;
        assert_eq!(f.target(), "192.168.1.50");
    }

    #[test]
    fn test_serde_roundtrip_preserves_case() {
        let json = serde_json::to_string(&sample()).unwrap();
        let parsed: Finding = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.severity, "MEDIUM");
    }
}
