use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AaharError {
    #[error("LLM provider failed: {0}")]
    LlmProvider(String),
    #[error("Tool call failed for '{tool_name}': {reason}")]
    ToolCallFailed { tool_name: String, reason: String },
    #[error("Parsing failed on output '{output}': {reason}")]
    ParseFailed { output: String, reason: String },
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Serialization/deserialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    Custom(String),
}

impl From<EmbeddingError> for AaharError {
    fn from(err: EmbeddingError) -> Self {
        AaharError::Custom(err.to_string())
    }
}

impl From<StoreError> for AaharError {
    fn from(err: StoreError) -> Self {
        AaharError::Custom(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Embedding invalid response: {0}")]
    InvalidResponse(String),
    #[error("Embedding provider error: {0}")]
    Provider(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("invalid document id: {0}")]
    InvalidId(String),
    #[error("missing embedding for document {0}")]
    MissingEmbedding(String),
}
