use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::provider::Oracle;
use crate::errors::ProvexError;

/// Chat-completions client for OpenAI and OpenAI-compatible endpoints.
pub struct OpenAiOracle {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiOracle {
    pub fn new(api_key: &str, model: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Oracle for OpenAiOracle {
    async fn complete(&self, prompt: &str) -> Result<String, ProvexError> {
        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": 4096,
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ProvexError::OracleUnavailable(format!("request failed: {}", e)))?;

        let status = resp.status();
        if status.as_u16() == 401 {
            return Err(ProvexError::OracleUnavailable("invalid API key".into()));
        }
        if status.as_u16() == 429 {
            return Err(ProvexError::OracleUnavailable("rate limited".into()));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| ProvexError::OracleUnavailable(format!("unreadable response: {}", e)))?;

        if let Some(error) = data.get("error") {
            return Err(ProvexError::OracleUnavailable(
                error["message"].as_str().unwrap_or("unknown error").to_string(),
            ));
        }

        let content = data["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| ProvexError::OracleUnavailable("no content in response".into()))?
            .to_string();

        debug!(model = %self.model, reply_len = content.len(), "Oracle reply received");
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
