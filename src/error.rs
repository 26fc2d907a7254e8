//! Error handling for the UI Kata application
//!
//! This module defines the top-level error type and a Result alias used
//! throughout the application. Failures inside the preview pipeline are
//! deliberately *not* represented here: those are user-facing diagnostics
//! (see [`crate::preview::Diagnostic`]) and never propagate as errors.

use thiserror::Error;

/// Main error type for UI Kata operations
#[derive(Error, Debug)]
pub enum KataError {
    /// Errors related to configuration and app-state persistence
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for UI Kata operations
pub type Result<T> = std::result::Result<T, KataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KataError::Config("missing data directory".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing data directory");
    }
}
