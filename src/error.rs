//! Error handling module for sitequote
//!
//! The calculator, recalculation controller and formatter are total and never
//! return errors. Everything here belongs to the boundaries: loading catalogs,
//! driving the quiz wizard and validating lead-capture input.

use thiserror::Error;

/// Main error type for sitequote
#[derive(Error, Debug)]
pub enum SiteQuoteError {
    /// IO errors (reading or writing catalog files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rule table or quiz catalog is inconsistent
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Boundary input validation (lead form fields)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Quiz wizard misuse (advancing without an answer, answering the wrong step)
    #[error("Quiz error: {0}")]
    Quiz(String),
}

/// Result type alias for sitequote operations
pub type Result<T> = std::result::Result<T, SiteQuoteError>;

impl SiteQuoteError {
    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a quiz error
    pub fn quiz(msg: impl Into<String>) -> Self {
        Self::Quiz(msg.into())
    }
}
