use std::sync::Arc;

use tracing::debug;

use crate::errors::ProvexError;
use crate::models::{Decision, ExecutionResult};
use crate::oracle::Oracle;
use crate::utils::strip_code_fences;

/// Classifies captured probe output as exploitable or not via the
/// oracle, keyed off the sentinel lines the probe contract mandates.
pub struct OutcomeAnalyzer {
    oracle: Arc<dyn Oracle>,
}

impl OutcomeAnalyzer {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    /// Submit the combined output under the fixed rubric and parse the
    /// structured reply. An unparsable reply surfaces as
    /// [`ProvexError::ClassificationParse`] carrying the raw text; the
    /// coordinator decides the fallback, the finding is never dropped
    /// silently here.
    pub async fn analyze(&self, result: &ExecutionResult) -> Result<Decision, ProvexError> {
        let prompt = build_rubric(&result.combined_output);
        let reply = self.oracle.complete(&prompt).await?;
        let cleaned = strip_code_fences(&reply);

        let decision: Decision = serde_json::from_str(&cleaned)
            .map_err(|_| ProvexError::ClassificationParse(cleaned.clone()))?;

        debug!(exploitable = ?decision.exploitable, "Execution output classified");
        Ok(decision)
    }
}

fn build_rubric(execution_output: &str) -> String {
    format!(
        r#"Execution output:
{execution_output}

RULES:
- FINAL_STATUS=SUCCESS means exploitable
- FINAL_STATUS=FAILURE means not exploitable

Respond ONLY in JSON:
{{
  "exploitable": "yes/no",
  "reason": "short explanation"
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Exploitable;

    /// Deterministic stand-in honoring the rubric, so the classifier
    /// path is tested without a live oracle.
    struct RubricOracle;

    #[async_trait::async_trait]
    impl Oracle for RubricOracle {
        async fn complete(&self, prompt: &str) -> Result<String, ProvexError> {
            // The rubric itself names both sentinels, so only look at the
            // output section above the RULES block.
            let output = prompt.split("RULES:").next().unwrap_or("");
            if output.contains("FINAL_STATUS=SUCCESS") {
                Ok(r#"{"exploitable": "yes", "reason": "success sentinel present"}"#.to_string())
            } else {
                Ok(r#"```json
{"exploitable": "no", "reason": "failure sentinel present"}
```"#
                    .to_string())
            }
        }
        fn model_name(&self) -> &str {
            "stub"
        }
    }

    struct BabblingOracle;

    #[async_trait::async_trait]
    impl Oracle for BabblingOracle {
        async fn complete(&self, _prompt: &str) -> Result<String, ProvexError> {
            Ok("I think it might be exploitable, hard to say!".to_string())
        }
        fn model_name(&self) -> &str {
            "stub"
        }
    }

    fn output(text: &str) -> ExecutionResult {
        ExecutionResult {
            combined_output: text.to_string(),
            timed_out: false,
        }
    }

    #[tokio::test]
    async fn test_success_sentinel_classifies_exploitable() {
        let analyzer = OutcomeAnalyzer::new(Arc::new(RubricOracle));
        let decision = analyzer
            .analyze(&output("probing...\nFINAL_STATUS=SUCCESS"))
            .await
            .unwrap();
        assert_eq!(decision.exploitable, Exploitable::Yes);
    }

    #[tokio::test]
    async fn test_failure_sentinel_classifies_not_exploitable_with_fences() {
        let analyzer = OutcomeAnalyzer::new(Arc::new(RubricOracle));
        let decision = analyzer
            .analyze(&output("FINAL_STATUS=FAILURE"))
            .await
            .unwrap();
        assert_eq!(decision.exploitable, Exploitable::No);
        assert_eq!(decision.reason, "failure sentinel present");
    }

    #[tokio::test]
    async fn test_prose_reply_is_parse_failure_with_raw_text() {
        let analyzer = OutcomeAnalyzer::new(Arc::new(BabblingOracle));
        let err = analyzer.analyze(&output("whatever")).await.unwrap_err();
        match err {
            ProvexError::ClassificationParse(raw) => {
                assert!(raw.contains("hard to say"));
            }
            other => panic!("expected ClassificationParse, got {:?}", other),
        }
    }
}
