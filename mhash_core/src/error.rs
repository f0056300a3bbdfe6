//! Error types for the mhash core library
//!
//! Callers see three outcomes of a hashing run besides success: the file was
//! not there ([`IoErrorKind::FileNotFound`]), the run was cancelled
//! ([`Error::Cancelled`]), or hashing failed ([`Error::HashingFailed`], which
//! always carries the original cause). Validation and internal errors cover
//! configuration mistakes and buffer pool faults.

use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod internal;
pub mod io;
pub mod validation;

pub use self::io::{IoError, IoErrorKind};
pub use self::validation::ValidationError;
pub use internal::InternalError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the mhash core library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Internal library errors
    #[error(transparent)]
    Internal(#[from] InternalError),

    /// A hashing run failed after it started; `source` is the original fault
    #[error("Hashing failed for {}: {source}", path.display())]
    HashingFailed {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    /// Cooperative cancellation was observed between two block reads
    #[error("Operation cancelled")]
    Cancelled,
}

impl Error {
    /// Wrap an error raised while hashing `path`
    pub fn hashing_failed(path: &Path, source: Error) -> Self {
        Self::HashingFailed {
            path: path.to_path_buf(),
            source: Box::new(source),
        }
    }

    /// True if the target path did not resolve to an existing file
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(io) if io.kind == IoErrorKind::FileNotFound)
    }

    /// True if the operation was aborted through its cancellation token
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::io;

    #[test]
    fn test_file_not_found_error_creation() {
        let path = Path::new("/non/existent/file.mkv");
        let error = Error::Io(IoError::file_not_found(path));

        assert!(error.is_not_found());
        assert!(!error.is_cancelled());
        match error {
            Error::Io(io_err) => {
                assert_eq!(io_err.kind, IoErrorKind::FileNotFound);
                assert_eq!(io_err.path, Some(path.to_path_buf()));
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_cancelled_is_distinct_from_failure() {
        let error = Error::Cancelled;
        assert!(error.is_cancelled());
        assert!(!error.is_not_found());
        assert_eq!(error.to_string(), "Operation cancelled");
        assert!(error.source().is_none());
    }

    #[test]
    fn test_hashing_failed_keeps_cause() {
        let path = Path::new("/media/episode01.mkv");
        let cause = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let error = Error::hashing_failed(path, Error::Io(IoError::from_std(cause).with_path(path)));

        assert!(!error.is_cancelled());
        assert!(!error.is_not_found());
        assert!(error.to_string().contains("Hashing failed"));
        assert!(error.to_string().contains("episode01.mkv"));

        let source = error.source().expect("wrapped cause");
        assert!(source.to_string().contains("Permission denied"));
        // The std::io::Error sits one level further down the chain
        assert!(source.source().is_some());
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();

        assert!(error.is_not_found());
    }

    #[test]
    fn test_buffer_pool_fault_is_internal() {
        let error: Error = InternalError::buffer_pool("zero buffer size").into();
        assert!(matches!(error, Error::Internal(InternalError::BufferPool { .. })));
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_error() -> Result<()> {
            Err(Error::Validation(ValidationError::invalid_configuration(
                "buffer_size must be greater than zero",
            )))
        }

        let error = returns_error().unwrap_err();
        assert!(error.to_string().contains("Invalid configuration"));
    }
}
