//! Error handling for linkdeck
//!
//! Centralized error types using thiserror. The reorder engine keeps its own
//! small construction-error enum; everything else funnels into
//! [`LinkdeckError`].

#![allow(dead_code)] // Error variants and helpers are available for future use

use crate::reorder::ReorderError;
use thiserror::Error;

/// Main error type for linkdeck
#[derive(Error, Debug)]
pub enum LinkdeckError {
    /// IO errors (file operations, terminal)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bookmark store errors (invalid data, commit mismatches)
    #[error("Store error: {0}")]
    Store(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Reorder engine construction errors
    #[error("Reorder error: {0}")]
    Reorder(#[from] ReorderError),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for linkdeck operations
pub type Result<T> = std::result::Result<T, LinkdeckError>;

impl LinkdeckError {
    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}
