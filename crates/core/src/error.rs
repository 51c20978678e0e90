//! Error types for xcpatch
//!
//! This module defines all error types used throughout the workspace.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! A missing anchor is not an error: the patcher records it as a skipped
//! step. Errors are reserved for conditions that must leave the manifest
//! untouched.

use crate::limits::LimitError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for xcpatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for xcpatch
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error without path context
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// I/O error on a specific file
    #[error("I/O error on '{}': {source}", path.display())]
    FileError {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Manifest text could not be tokenized or parsed
    #[error("Parse error at line {line}, column {column}: {message}")]
    ParseError {
        /// 1-based line
        line: usize,
        /// 1-based column, in characters
        column: usize,
        /// What went wrong
        message: String,
    },

    /// A string that is not a 24-character uppercase hex identifier
    #[error("Invalid object identifier: {0:?}")]
    InvalidObjectId(String),

    /// Every draw collided with an identifier already in use
    #[error("Could not allocate a unique identifier after {0} attempts")]
    IdExhausted(usize),

    /// The group to be created already exists in the manifest
    #[error("Already registered: {0}")]
    AlreadyRegistered(String),

    /// The patched text failed post-splice validation
    #[error("Data corruption: {0}")]
    Corruption(String),

    /// Configuration file or flag value is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A size or depth limit was exceeded
    #[error("Limit exceeded: {0}")]
    LimitExceeded(#[from] LimitError),
}

impl Error {
    /// Attach a path to an I/O error
    pub fn file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::FileError {
            path: path.into(),
            source,
        }
    }

    /// Whether this error was caused by the file system
    pub fn is_io(&self) -> bool {
        matches!(self, Error::IoError(_) | Error::FileError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let err = Error::IoError(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        let msg = err.to_string();
        assert!(msg.contains("I/O error"));
        assert!(err.is_io());
    }

    #[test]
    fn test_error_display_file() {
        let err = Error::file(
            "App.xcodeproj/project.pbxproj",
            io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("App.xcodeproj/project.pbxproj"));
        assert!(msg.contains("access denied"));
        assert!(err.is_io());
    }

    #[test]
    fn test_error_display_parse() {
        let err = Error::ParseError {
            line: 12,
            column: 7,
            message: "expected ';'".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 12"));
        assert!(msg.contains("column 7"));
        assert!(msg.contains("expected ';'"));
        assert!(!err.is_io());
    }

    #[test]
    fn test_error_display_invalid_id() {
        let err = Error::InvalidObjectId("xyz".to_string());
        assert!(err.to_string().contains("\"xyz\""));
    }

    #[test]
    fn test_error_display_id_exhausted() {
        let err = Error::IdExhausted(64);
        assert!(err.to_string().contains("64 attempts"));
    }

    #[test]
    fn test_error_display_corruption() {
        let err = Error::Corruption("unbalanced braces".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Data corruption"));
        assert!(msg.contains("unbalanced braces"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::IoError(_)));
    }

    #[test]
    fn test_error_from_limit() {
        let limit = LimitError::NestingTooDeep { actual: 9, max: 8 };
        let err: Error = limit.into();
        assert!(matches!(err, Error::LimitExceeded(_)));
        assert!(err.to_string().contains("Nesting too deep"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }

        fn returns_error() -> Result<i32> {
            Err(Error::InvalidConfig("test".to_string()))
        }

        assert_eq!(returns_result().unwrap(), 42);
        assert!(returns_error().is_err());
    }
}
