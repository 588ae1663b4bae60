//! Error types for the featurizer.
//!
//! All fallible operations return [`FeaturizerError`] through the crate-wide
//! [`Result`] alias. Only a few of these errors ever reach callers of
//! [`Featurizer::fit`](crate::featurizer::Featurizer::fit): resource lookups
//! that fail are recovered inside the pipeline, and an empty training corpus
//! is reported as [`FitOutcome::EmptyCorpus`](crate::featurizer::FitOutcome)
//! rather than as an error.
//!
//! # Examples
//!
//! ```
//! use intent_featurizer::error::{FeaturizerError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(FeaturizerError::malformed_snapshot("missing key 'vectorizer'"))
//! }
//!
//! assert!(matches!(load(), Err(FeaturizerError::MalformedSnapshot(_))));
//! ```

use std::io;

use thiserror::Error;

/// The main error type for featurizer operations.
#[derive(Error, Debug)]
pub enum FeaturizerError {
    /// I/O errors (reading datasets, persisting snapshots)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A language resource (stemmer, word clusters) is not available
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// A snapshot is missing keys or carries inconsistent state
    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// The featurizer has not been fitted yet
    #[error("Not fitted: {0}")]
    NotFitted(String),

    /// Two inputs that must have the same length do not
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Invalid argument or configuration value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for operations that may fail with FeaturizerError.
pub type Result<T> = std::result::Result<T, FeaturizerError>;

impl FeaturizerError {
    /// Create a new resource unavailable error.
    pub fn resource_unavailable<S: Into<String>>(msg: S) -> Self {
        FeaturizerError::ResourceUnavailable(msg.into())
    }

    /// Create a new malformed snapshot error.
    pub fn malformed_snapshot<S: Into<String>>(msg: S) -> Self {
        FeaturizerError::MalformedSnapshot(msg.into())
    }

    /// Create a new not fitted error.
    pub fn not_fitted<S: Into<String>>(msg: S) -> Self {
        FeaturizerError::NotFitted(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        FeaturizerError::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = FeaturizerError::resource_unavailable("no stemmer for 'ja'");
        assert_eq!(error.to_string(), "Resource unavailable: no stemmer for 'ja'");

        let error = FeaturizerError::malformed_snapshot("idf length 2 != vocabulary size 3");
        assert_eq!(
            error.to_string(),
            "Malformed snapshot: idf length 2 != vocabulary size 3"
        );

        let error = FeaturizerError::DimensionMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(error.to_string(), "Dimension mismatch: expected 3, got 2");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = FeaturizerError::from(io_error);

        match error {
            FeaturizerError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
