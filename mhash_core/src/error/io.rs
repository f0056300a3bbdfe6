//! I/O failures, tagged with the path they happened on

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// An I/O failure while resolving, opening or reading a file
#[derive(Error, Debug)]
#[error("{}", describe(self))]
pub struct IoError {
    pub kind: IoErrorKind,
    /// File the operation was aimed at, when known
    pub path: Option<PathBuf>,
    #[source]
    pub source: Option<std::io::Error>,
}

/// How an [`IoError`] is reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoErrorKind {
    /// Path does not resolve to an existing regular file
    FileNotFound,
    PermissionDenied,
    Other,
}

impl IoErrorKind {
    /// Bucket a std error kind
    ///
    /// Every way a path can fail to name a file counts as not found: a
    /// missing entry, a regular file used as a directory component, or a
    /// name the platform rejects.
    pub fn classify(kind: std::io::ErrorKind) -> Self {
        use std::io::ErrorKind as Std;

        match kind {
            Std::NotFound | Std::NotADirectory | Std::InvalidFilename => Self::FileNotFound,
            Std::PermissionDenied => Self::PermissionDenied,
            _ => Self::Other,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::FileNotFound => "File not found",
            Self::PermissionDenied => "Permission denied",
            Self::Other => "I/O error",
        }
    }
}

impl IoError {
    /// The path is absent or names something other than a regular file
    pub fn file_not_found(path: &Path) -> Self {
        Self {
            kind: IoErrorKind::FileNotFound,
            path: Some(path.to_path_buf()),
            source: None,
        }
    }

    pub fn from_std(source: std::io::Error) -> Self {
        Self {
            kind: IoErrorKind::classify(source.kind()),
            path: None,
            source: Some(source),
        }
    }

    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }
}

// "<label>[: <path>][: <cause>]", the cause only for unclassified errors
fn describe(error: &IoError) -> String {
    let mut message = error.kind.label().to_string();
    if let Some(path) = &error.path {
        let _ = write!(message, ": {}", path.display());
    }
    if let (IoErrorKind::Other, Some(source)) = (error.kind, &error.source) {
        let _ = write!(message, ": {source}");
    }
    message
}
