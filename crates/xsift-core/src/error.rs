//! Error types for xsift
//!
//! Provides the error taxonomy shared by every stage of query compilation
//! and execution.

use thiserror::Error;

/// The main error type for xsift operations
#[derive(Error, Debug)]
pub enum Error {
    // ========== Query Errors ==========
    /// The query text is not valid XPath and was rejected by the lexer or
    /// parser before compilation started.
    #[error("xpath parse error: {0}")]
    Parse(String),

    /// The query parsed as XPath but falls outside the supported search
    /// subset, or references attributes the catalog does not know.
    #[error("illegal xpath: {0}")]
    IllegalXpath(String),

    // ========== Store Errors ==========
    #[error("store error: {0}")]
    Store(String),

    // ========== IO Errors ==========
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ========== Internal Errors ==========
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for xsift operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns true if this error was caused by the query text itself.
    ///
    /// The service layer maps client errors to HTTP 400; everything else
    /// is a server-side failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Parse(_) | Error::IllegalXpath(_))
    }

    /// Shorthand for the illegal-xpath case used throughout the compiler.
    pub fn illegal<S: Into<String>>(msg: S) -> Self {
        Error::IllegalXpath(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::IllegalXpath("axis 'parent' not supported".to_string());
        assert_eq!(
            err.to_string(),
            "illegal xpath: axis 'parent' not supported"
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(Error::Parse("unexpected token".to_string()).is_client_error());
        assert!(Error::illegal("Unhandled token").is_client_error());
        assert!(!Error::Store("disk full".to_string()).is_client_error());
        assert!(!Error::Internal("catalog mismatch".to_string()).is_client_error());
    }
}
