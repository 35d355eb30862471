use serde::{Deserialize, Serialize};

use crate::models::Risk;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProvexConfig {
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OracleConfig {
    pub provider: String,
    pub model: String,
    /// Resolved from PROVEX_API_KEY / OPENAI_API_KEY when absent.
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Ports the reachability scanner is allowed to touch.
    pub approved_ports: Vec<u16>,
    /// Per-probe TCP connect timeout.
    pub connect_timeout_ms: u64,
    /// Cap on concurrently probed hosts.
    pub max_concurrent_hosts: usize,
    #[serde(default)]
    pub risk_tiers: RiskTiers,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            approved_ports: vec![22, 80, 443, 3306, 5432, 8080],
            connect_timeout_ms: 1_000,
            max_concurrent_hosts: 64,
            risk_tiers: RiskTiers::default(),
        }
    }
}

impl ScanConfig {
    /// Risk tier for an open port. Ports outside the high/medium tiers
    /// classify low.
    pub fn risk_for_port(&self, port: u16) -> Risk {
        if self.risk_tiers.high.contains(&port) {
            Risk::High
        } else if self.risk_tiers.medium.contains(&port) {
            Risk::Medium
        } else {
            Risk::Low
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RiskTiers {
    pub high: Vec<u16>,
    pub medium: Vec<u16>,
}

impl Default for RiskTiers {
    fn default() -> Self {
        Self {
            high: vec![3306, 5432],
            medium: vec![22, 8080],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Interpreter the generated probes are written for.
    pub interpreter: String,
    /// Hard wall-clock limit per probe execution.
    pub timeout_secs: u64,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Bounded worker count for concurrent finding validation.
    pub workers: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { workers: 4 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "./results".to_string(),
        }
    }
}
