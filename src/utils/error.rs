//! Error handling for batchflow
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for batchflow
pub type Result<T> = std::result::Result<T, BatchError>;

/// Main error type for batch execution
///
/// Processing-function failures are not represented here: they are transient
/// signals consumed by the retry loop and never surface to the caller as a
/// `BatchError`. Only configuration and persistence problems abort a run.
#[derive(Error, Debug)]
pub enum BatchError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure while writing a successful batch result to its sink
    #[error("Failed to persist result of batch {index}: {source}")]
    Persist {
        /// 1-based index of the batch whose result could not be persisted
        index: usize,
        /// Underlying serialization or IO error
        source: Box<BatchError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BatchError::Config("batch_size must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: batch_size must be at least 1"
        );
    }

    #[test]
    fn test_persist_error_names_batch() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = BatchError::Persist {
            index: 3,
            source: Box::new(BatchError::Io(io)),
        };
        let msg = err.to_string();
        assert!(msg.contains("batch 3"));
        assert!(msg.contains("denied"));
    }
}
