use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::ProvexError;
use crate::models::{Finding, ProbeProgram};
use crate::oracle::Oracle;
use crate::utils::strip_code_fences;

/// Asks the oracle to synthesize a safe probe program for one finding.
///
/// The safety contract below is advisory to the oracle, not mechanically
/// enforced here; the sandboxed runner's wall-clock limit is the only
/// mechanical safety net.
pub struct ProbeGenerator {
    oracle: Arc<dyn Oracle>,
}

impl ProbeGenerator {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    /// Generate the probe source for a finding, with any surrounding
    /// code fences stripped. An empty or unparsable reply yields an
    /// empty program, which the coordinator treats as "skip".
    pub async fn generate(&self, finding: &Finding) -> Result<ProbeProgram, ProvexError> {
        let prompt = build_prompt(finding)?;
        let reply = self.oracle.complete(&prompt).await?;
        let source = strip_code_fences(&reply);

        if source.is_empty() {
            warn!(finding = %finding.finding, target = %finding.target(), "Oracle produced an empty probe");
        } else {
            debug!(
                finding = %finding.finding,
                source_len = source.len(),
                "Probe program generated"
            );
        }
        Ok(ProbeProgram { source })
    }
}

fn build_prompt(finding: &Finding) -> Result<String, ProvexError> {
    let finding_json = serde_json::to_string_pretty(finding)?;
    Ok(format!(
        r#"You are a security automation assistant.

INPUT (single vulnerability):
{finding_json}

TASK:
Generate a SAFE Python script to PROBE a web application.

STRICT RULES (MANDATORY):
- Output ONLY valid Python code
- DO NOT include explanations, comments, or markdown
- DO NOT include code fences (```)

SCRIPT REQUIREMENTS:
- If the finding mentions "Web Server" or "Unauthenticated":
    - Send read-only HTTP GET requests to / and /admin
    - If ANY endpoint returns HTTP 200 without authentication:
        print FINAL_STATUS=SUCCESS
      else:
        print FINAL_STATUS=FAILURE
- If the finding mentions "SSL" or "TLS":
    - ONLY test if the port is reachable using a socket connection
    - NEVER issue an HTTPS request
- Print exactly one of FINAL_STATUS=SUCCESS or FINAL_STATUS=FAILURE
- Do NOT exploit, modify, or destroy anything
"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn web_finding() -> Finding {
        Finding {
            scanner: "Nmap".to_string(),
            host: "192.168.1.50".to_string(),
            port: Some(80),
            protocol: Some("http".to_string()),
            finding: "Unauthenticated Web Server".to_string(),
            severity: "MEDIUM".to_string(),
            summary: "Admin interface exposed".to_string(),
        }
    }

    #[test]
    fn test_prompt_carries_finding_and_contract() {
        let prompt = build_prompt(&web_finding()).unwrap();
        assert!(prompt.contains("Unauthenticated Web Server"));
        assert!(prompt.contains("192.168.1.50"));
        assert!(prompt.contains("FINAL_STATUS=SUCCESS"));
        assert!(prompt.contains("FINAL_STATUS=FAILURE"));
        assert!(prompt.contains("socket connection"));
    }

    struct FencedOracle;

    #[async_trait::async_trait]
    impl Oracle for FencedOracle {
        async fn complete(&self, _prompt: &str) -> Result<String, ProvexError> {
            Ok("```python\nprint('FINAL_STATUS=FAILURE')\n```".to_string())
        }
        fn model_name(&self) -> &str {
            "stub"
        }
    }

    struct SilentOracle;

    #[async_trait::async_trait]
    impl Oracle for SilentOracle {
        async fn complete(&self, _prompt: &str) -> Result<String, ProvexError> {
            Ok("   ".to_string())
        }
        fn model_name(&self) -> &str {
            "stub"
        }
    }

    #[tokio::test]
    async fn test_generate_strips_fences() {
        let generator = ProbeGenerator::new(Arc::new(FencedOracle));
        let program = generator.generate(&web_finding()).await.unwrap();
        assert_eq!(program.source, "print('FINAL_STATUS=FAILURE')");
    }

    #[tokio::test]
    async fn test_blank_reply_yields_empty_program() {
        let generator = ProbeGenerator::new(Arc::new(SilentOracle));
        let program = generator.generate(&web_finding()).await.unwrap();
        assert!(program.is_empty());
    }
}
