use serde::{Deserialize, Serialize};

/// Generated probe source for one finding. Fence markers are already
/// stripped; an empty program means the finding is skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeProgram {
    pub source: String,
}

impl ProbeProgram {
    pub fn is_empty(&self) -> bool {
        self.source.trim().is_empty()
    }
}

/// Captured effect of executing a probe program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Stdout and stderr, concatenated. On timeout this holds only what
    /// the child produced before it was terminated.
    pub combined_output: String,
    pub timed_out: bool,
}
