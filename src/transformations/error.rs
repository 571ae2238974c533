//! Transformation error types.

use thiserror::Error;

use super::chain::CallError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum TransformationError {
    #[error("Handler '{handler_name}' failed: {message}")]
    HandlerError {
        handler_name: String,
        message: String,
    },

    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    /// A read-call failed for a reason other than a revert.
    #[error("Call '{call}' failed: {source}")]
    CallFailed {
        call: String,
        #[source]
        source: CallError,
    },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Type conversion error: {0}")]
    TypeConversion(String),
}

impl TransformationError {
    /// Create a handler error with context.
    pub fn handler(name: &str, message: impl Into<String>) -> Self {
        Self::HandlerError {
            handler_name: name.to_string(),
            message: message.into(),
        }
    }
}
