use async_trait::async_trait;

use crate::errors::ProvexError;

/// The external language-model service, treated as an opaque
/// text-completion black box. One request in, free text out; callers own
/// all parsing of the reply (including fence stripping). Tests
/// substitute deterministic stubs; the live oracle is never exercised
/// by the test suite.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Free-form text completion for a single instruction.
    async fn complete(&self, prompt: &str) -> Result<String, ProvexError>;

    /// Model identifier for logging.
    fn model_name(&self) -> &str;
}

impl std::fmt::Debug for dyn Oracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Oracle({})", self.model_name())
    }
}
