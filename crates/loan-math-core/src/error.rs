use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanMathError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LoanMathError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        LoanMathError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for LoanMathError {
    fn from(e: serde_json::Error) -> Self {
        LoanMathError::SerializationError(e.to_string())
    }
}
