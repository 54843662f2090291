//! Error types for jwwrust library

use std::io;
use thiserror::Error;

/// Main error type for jwwrust operations
#[derive(Debug, Error)]
pub enum JwwError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// First 8 bytes of the file are not the JWW signature
    #[error("invalid JWW signature: expected 'JwwData.'")]
    InvalidSignature,

    /// The stream ended before a complete value could be read
    #[error("unexpected end of stream")]
    UnexpectedEnd,

    /// An object stream declared a class this reader does not recognize
    #[error("unknown entity class: {0}")]
    UnknownClass(String),

    /// A back-reference named a class id never declared in its stream
    #[error("unresolved class reference: {0}")]
    InvalidClassRef(u16),

    /// A parse step failed; wraps the inner error with the step name
    #[error("{context}: {source}")]
    Decode {
        /// The logical step that failed (e.g. "reading layer group 3 scale")
        context: String,
        /// The underlying failure
        #[source]
        source: Box<JwwError>,
    },
}

/// Result type alias for jwwrust operations
pub type Result<T> = std::result::Result<T, JwwError>;

/// Attach a step label to any error propagating out of a parse step.
///
/// The JWW format is positional with no resynchronization points, so a
/// short read deep in the header is meaningless without the step name.
pub(crate) trait ErrorContext<T> {
    fn context(self, step: &str) -> Result<T>;
    fn with_context<F: FnOnce() -> String>(self, step: F) -> Result<T>;
}

impl<T> ErrorContext<T> for Result<T> {
    fn context(self, step: &str) -> Result<T> {
        self.map_err(|e| JwwError::Decode {
            context: step.to_string(),
            source: Box::new(e),
        })
    }

    fn with_context<F: FnOnce() -> String>(self, step: F) -> Result<T> {
        self.map_err(|e| JwwError::Decode {
            context: step(),
            source: Box::new(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = JwwError::UnknownClass("CDataFoo".to_string());
        assert_eq!(err.to_string(), "unknown entity class: CDataFoo");
    }

    #[test]
    fn test_context_chain() {
        let inner: Result<()> = Err(JwwError::UnexpectedEnd);
        let err = inner.context("reading version").unwrap_err();
        assert_eq!(err.to_string(), "reading version: unexpected end of stream");

        // The inner error stays reachable through the source chain
        match err {
            JwwError::Decode { source, .. } => {
                assert!(matches!(*source, JwwError::UnexpectedEnd));
            }
            other => panic!("expected Decode, got {:?}", other),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let jww_err: JwwError = io_err.into();
        assert!(matches!(jww_err, JwwError::Io(_)));
    }
}
