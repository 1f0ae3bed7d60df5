//! Error types for pith operations.
//!
//! The extraction algorithm itself never fails: numeric degeneracy and
//! structural edge cases all degrade to documented fallbacks. The error
//! surface here covers the host-facing pieces around it, chiefly the
//! HTML adapter and method parsing.
//!
//! # Example
//!
//! ```rust
//! use pith_core::{Method, PithError};
//!
//! match "densest".parse::<Method>() {
//!     Err(PithError::UnknownMethod(name)) => assert_eq!(name, "densest"),
//!     other => panic!("expected UnknownMethod, got {:?}", other),
//! }
//! ```

use thiserror::Error;

/// Main error type for tree construction and configuration.
#[derive(Error, Debug)]
pub enum PithError {
    /// The markup contained no root element to build a tree from.
    #[error("Document has no element content")]
    EmptyDocument,

    /// HTML could not be converted into a document tree.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// An extraction method name outside `standard`/`composite`/`hybrid`.
    #[error("Unknown extraction method: {0} (expected standard, composite, or hybrid)")]
    UnknownMethod(String),
}

/// Result type alias for [`PithError`].
pub type Result<T> = std::result::Result<T, PithError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PithError::UnknownMethod("densest".to_string());
        assert!(err.to_string().contains("densest"));
        assert!(err.to_string().contains("hybrid"));
    }

    #[test]
    fn test_empty_document_display() {
        assert!(PithError::EmptyDocument.to_string().contains("no element content"));
    }
}
