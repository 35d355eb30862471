use std::path::Path;

use tracing::debug;

use super::types::ProvexConfig;
use crate::errors::ProvexError;

/// Load configuration: defaults when no file is given, YAML overlay when
/// one is. The oracle API key falls back to the environment so it never
/// has to live in a config file.
pub async fn load_config(path: Option<&Path>) -> Result<ProvexConfig, ProvexError> {
    let mut config = match path {
        Some(path) => {
            if !path.exists() {
                return Err(ProvexError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            let content = tokio::fs::read_to_string(path).await?;
            let config: ProvexConfig = serde_yaml::from_str(&content)?;
            debug!(path = %path.display(), "Loaded configuration file");
            config
        }
        None => ProvexConfig::default(),
    };

    if config.oracle.api_key.is_none() {
        config.oracle.api_key = std::env::var("PROVEX_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .ok();
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &ProvexConfig) -> Result<(), ProvexError> {
    if config.scan.approved_ports.is_empty() {
        return Err(ProvexError::Config(
            "scan.approved_ports must not be empty".into(),
        ));
    }
    if config.scan.connect_timeout_ms == 0 {
        return Err(ProvexError::Config(
            "scan.connect_timeout_ms must be positive".into(),
        ));
    }
    if config.scan.max_concurrent_hosts == 0 {
        return Err(ProvexError::Config(
            "scan.max_concurrent_hosts must be at least 1".into(),
        ));
    }
    if config.execution.timeout_secs == 0 {
        return Err(ProvexError::Config(
            "execution.timeout_secs must be positive".into(),
        ));
    }
    if config.pipeline.workers == 0 {
        return Err(ProvexError::Config(
            "pipeline.workers must be at least 1".into(),
        ));
    }
    Ok(())
}
