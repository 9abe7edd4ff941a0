//! Domain error types
//!
//! This module defines the error hierarchy for onexport.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main onexport error type
///
/// This is the primary error type used throughout the application.
/// Export jobs never surface it to callers; the runner folds it into a
/// [`crate::domain::JobOutcome`] instead.
#[derive(Debug, Error)]
pub enum OnexportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Errors raised by the notebook automation bridge
    #[error("Automation error: {0}")]
    Automation(#[from] AutomationError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Automation bridge errors
///
/// Errors that occur when talking to OneNote through the helper program.
#[derive(Debug, Error)]
pub enum AutomationError {
    /// Helper executable could not be located
    #[error("OneNote helper not found: {0}")]
    HelperNotFound(String),

    /// Helper process could not be started or exited abnormally
    #[error("Helper execution failed: {0}")]
    HelperFailed(String),

    /// Helper answered with an RPC error
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Helper answered with something that is not a valid response
    #[error("Invalid helper response: {0}")]
    InvalidResponse(String),

    /// Notebook could not be opened (inaccessible, password protected, sync failure)
    #[error("Failed to open notebook: {0}")]
    OpenFailed(String),

    /// Publish command was rejected immediately
    #[error("Publish rejected: {0}")]
    PublishRejected(String),

    /// Helper call exceeded its deadline
    #[error("Helper call timed out after {0}s")]
    Timeout(u64),
}

impl AutomationError {
    /// Diagnostic code carried by the error, when the bridge reported one
    pub fn code(&self) -> Option<i64> {
        match self {
            AutomationError::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl OnexportError {
    /// Error text without the outer category prefix for automation failures
    pub fn detail(&self) -> String {
        match self {
            OnexportError::Automation(inner) => inner.to_string(),
            other => other.to_string(),
        }
    }

    /// Diagnostic code reported by the automation bridge, if any
    pub fn code(&self) -> Option<i64> {
        match self {
            OnexportError::Automation(inner) => inner.code(),
            _ => None,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for OnexportError {
    fn from(err: std::io::Error) -> Self {
        OnexportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for OnexportError {
    fn from(err: serde_json::Error) -> Self {
        OnexportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for OnexportError {
    fn from(err: toml::de::Error) -> Self {
        OnexportError::Configuration(format!("TOML parse error: {err}"))
    }
}
