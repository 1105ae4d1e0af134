//! Error types for the Freqscope library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`FreqscopeError`] enum. Configuration problems are reported before any
//! backend access and always name the offending field; backend failures are
//! kept distinct so a job executor can decide whether to retry.
//!
//! # Examples
//!
//! ```
//! use freqscope::error::{FreqscopeError, Result};
//!
//! fn check_words(num_words: i64) -> Result<()> {
//!     if num_words < 0 {
//!         return Err(FreqscopeError::invalid_configuration(
//!             "num_words",
//!             "must be zero or greater",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! let err = check_words(-1).unwrap_err();
//! assert!(err.is_configuration_error());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Freqscope operations.
#[derive(Error, Debug)]
pub enum FreqscopeError {
    /// A configuration field violates its constraint.
    #[error("Invalid configuration: `{field}` {message}")]
    InvalidConfiguration {
        /// Name of the offending field.
        field: String,
        /// The constraint that was violated.
        message: String,
    },

    /// The search backend timed out or could not be reached.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A term-vector payload could not be used.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Analysis-related errors
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// I/O errors (reading payloads, configuration files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with FreqscopeError.
pub type Result<T> = std::result::Result<T, FreqscopeError>;

impl FreqscopeError {
    /// Create a new configuration error for `field`.
    pub fn invalid_configuration<F: Into<String>, S: Into<String>>(field: F, msg: S) -> Self {
        FreqscopeError::InvalidConfiguration {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create a new backend-unavailable error.
    pub fn backend_unavailable<S: Into<String>>(msg: S) -> Self {
        FreqscopeError::BackendUnavailable(msg.into())
    }

    /// Create a new decode error.
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        FreqscopeError::Decode(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        FreqscopeError::Analysis(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        FreqscopeError::Other(msg.into())
    }

    /// Create a new timeout error.
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        FreqscopeError::BackendUnavailable(format!("Timeout: {}", msg.into()))
    }

    /// Whether this error was caused by the configuration rather than by I/O.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, FreqscopeError::InvalidConfiguration { .. })
    }

    /// Whether the hosting job executor may retry the analysis.
    ///
    /// Only backend outages qualify; the core never retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FreqscopeError::BackendUnavailable(_))
    }

    /// The message shown to an end user.
    pub fn user_message(&self) -> String {
        match self {
            FreqscopeError::InvalidConfiguration { .. } => self.to_string(),
            FreqscopeError::BackendUnavailable(_) => {
                "analysis temporarily unavailable, please try again later".to_string()
            }
            _ => "analysis failed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = FreqscopeError::invalid_configuration("num_words", "must be zero or greater");
        assert_eq!(
            error.to_string(),
            "Invalid configuration: `num_words` must be zero or greater"
        );

        let error = FreqscopeError::backend_unavailable("connection refused");
        assert_eq!(error.to_string(), "Backend unavailable: connection refused");

        let error = FreqscopeError::analysis("Test analysis error");
        assert_eq!(error.to_string(), "Analysis error: Test analysis error");
    }

    #[test]
    fn test_error_kinds() {
        let config = FreqscopeError::invalid_configuration("ngram_size", "must be at least 1");
        assert!(config.is_configuration_error());
        assert!(!config.is_retryable());

        let backend = FreqscopeError::timeout("term vectors");
        assert!(backend.is_retryable());
        assert!(!backend.is_configuration_error());
        assert_eq!(
            backend.user_message(),
            "analysis temporarily unavailable, please try again later"
        );
        assert!(config.user_message().contains("ngram_size"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = FreqscopeError::from(io_error);

        match error {
            FreqscopeError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
