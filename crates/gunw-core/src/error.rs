use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid ARN (no region field): {0}")]
    InvalidArn(String),

    #[error("timestamp error: {0}")]
    Timestamp(#[from] jiff::Error),
}
