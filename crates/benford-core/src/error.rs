use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenfordError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Length mismatch in {context}: expected {expected} values, got {actual}")]
    LengthMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for BenfordError {
    fn from(e: serde_json::Error) -> Self {
        BenfordError::SerializationError(e.to_string())
    }
}
