//! Error taxonomy for store operations.

use thiserror::Error;

use bookbuddy_storage::StorageError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the book and session stores.
///
/// Validation failures are raised before any persistence attempt; storage
/// failures wrap the backend error unchanged.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("validation error: {message}")]
    Validation {
        details: Vec<serde_json::Value>,
        message: String,
    },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StoreError {
    /// Create a validation error with field-level details.
    pub fn validation(details: Vec<serde_json::Value>, message: impl Into<String>) -> Self {
        Self::Validation {
            details,
            message: message.into(),
        }
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_constructor_keeps_details() {
        let details = vec![serde_json::json!({"field": "title", "error": "required"})];
        let error = StoreError::validation(details.clone(), "invalid book fields");

        match error {
            StoreError::Validation {
                details: d,
                message,
            } => {
                assert_eq!(d, details);
                assert_eq!(message, "invalid book fields");
            }
            _ => panic!("expected Validation error"),
        }
    }

    #[test]
    fn not_found_renders_message() {
        let error = StoreError::not_found("no book with id 42");
        assert_eq!(error.to_string(), "not found: no book with id 42");
    }
}
