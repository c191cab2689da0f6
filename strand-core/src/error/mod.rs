//! Core error types for Strand

use thiserror::Error;

/// Main error type for Strand operations
#[derive(Error, Debug)]
pub enum StrandError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Duplicate tool name: '{name}' is already registered by the {family} family")]
    DuplicateToolName { name: String, family: String },

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("{tool} is not installed. {hint}")]
    ToolMissing { tool: String, hint: String },

    #[error("Execution error: {0}")]
    Execution(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias for Strand operations
pub type StrandResult<T> = Result<T, StrandError>;

// Conversion implementations for common error types
impl From<serde_json::Error> for StrandError {
    fn from(err: serde_json::Error) -> Self {
        StrandError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for StrandError {
    fn from(err: toml::de::Error) -> Self {
        StrandError::Parse(err.to_string())
    }
}

impl From<anyhow::Error> for StrandError {
    fn from(err: anyhow::Error) -> Self {
        StrandError::Other(err.to_string())
    }
}
