use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvexError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid network range: {0}")]
    InvalidRange(String),

    #[error("Malformed scanner report: {0}")]
    MalformedInput(String),

    #[error("Oracle unavailable: {0}")]
    OracleUnavailable(String),

    /// The analyzer reply did not parse into a two-field decision.
    /// Carries the raw reply so the coordinator can preserve it.
    #[error("Unparsable classification reply: {0}")]
    ClassificationParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
