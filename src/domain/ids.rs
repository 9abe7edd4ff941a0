//! Notebook identifier type
//!
//! OneNote hands out opaque hierarchy IDs such as
//! `{A1B2C3D4-...}{1}{B0}`. They are stable within a session only, so they are
//! never persisted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Notebook identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use onexport::domain::ids::NotebookId;
/// use std::str::FromStr;
///
/// let id = NotebookId::from_str("{0D5F5B6E-1F1A-4E62-9C39-6D2C2C4A1E11}{1}{B0}").unwrap();
/// assert!(id.as_str().starts_with("{0D5F"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotebookId(String);

impl NotebookId {
    /// Creates a new NotebookId, rejecting blank identifiers
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Notebook ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the notebook ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NotebookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NotebookId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for NotebookId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
