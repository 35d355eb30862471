pub mod openai;
pub mod provider;

use std::sync::Arc;

use crate::config::OracleConfig;
use crate::errors::ProvexError;

pub use openai::OpenAiOracle;
pub use provider::Oracle;

/// Build an oracle client from configuration. `openai` talks to the
/// hosted API; `local` targets any OpenAI-compatible endpoint at the
/// configured base URL without requiring a key.
pub fn create_oracle(config: &OracleConfig) -> Result<Arc<dyn Oracle>, ProvexError> {
    match config.provider.as_str() {
        "openai" => {
            let api_key = config.api_key.as_deref().ok_or_else(|| {
                ProvexError::Config(
                    "No oracle API key: set oracle.api_key, PROVEX_API_KEY or OPENAI_API_KEY"
                        .into(),
                )
            })?;
            Ok(Arc::new(OpenAiOracle::new(
                api_key,
                &config.model,
                &config.base_url,
            )))
        }
        "local" => Ok(Arc::new(OpenAiOracle::new(
            config.api_key.as_deref().unwrap_or("unused"),
            &config.model,
            &config.base_url,
        ))),
        other => Err(ProvexError::Config(format!(
            "Unknown oracle provider: {} (expected openai or local)",
            other
        ))),
    }
}
