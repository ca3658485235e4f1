//! Error types for the trace generators.

use thiserror::Error;

use stepwise_trace::TraceError;

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, AlgoError>;

/// Errors that can occur before or during trace generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgoError {
    /// Malformed or out-of-range input. No generation is attempted.
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// No coin combination reaches the amount.
    #[error("Amount {amount} is unreachable with the given coins")]
    Unreachable { amount: usize },

    /// A generator produced a malformed trace.
    #[error("Trace error: {0}")]
    Trace(#[from] TraceError),
}

impl AlgoError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        AlgoError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}
