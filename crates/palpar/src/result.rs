//! Result and error types for Palpar.

use thiserror::Error;

/// Result type for Palpar operations
pub type PalparResult<T> = Result<T, PalparError>;

/// Errors that can occur in Palpar
#[derive(Debug, Error)]
pub enum PalparError {
    /// Wait operation exceeded its bound.
    ///
    /// `what` names the selector or condition that was waited for so the
    /// message stands alone in a run report.
    #[error("Timed out after {ms}ms waiting for {what}")]
    Timeout {
        /// Description of the awaited condition (usually a selector)
        what: String,
        /// Timeout bound in milliseconds
        ms: u64,
    },

    /// Failure reported by the remote automation driver
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Screenshot capture or write failed
    #[error("Screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PalparError {
    /// Create a driver error from any message
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Whether this error is a wait timeout
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_names_condition_and_bound() {
        let err = PalparError::Timeout {
            what: "element displayed: ~Drag".to_string(),
            ms: 30_000,
        };
        let msg = err.to_string();
        assert!(msg.contains("30000ms"));
        assert!(msg.contains("~Drag"));
        assert!(err.is_timeout());
    }

    #[test]
    fn test_driver_error_constructor() {
        let err = PalparError::driver("connection reset");
        assert_eq!(err.to_string(), "Driver error: connection reset");
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PalparError = io.into();
        assert!(matches!(err, PalparError::Io(_)));
    }
}
