//! Error types for the release pipeline.
//!
//! Defines the pipeline error enum plus small helpers (`fs_context`,
//! `Context`, `bail!`) used to attach path and operation context to failures.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the release pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error with a descriptive message
    #[error("{0}")]
    GenericError(String),

    /// IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// IO error with operation and path context
    #[error("Failed while {operation} at {path}: {source}")]
    FsError {
        /// What the pipeline was doing
        operation: String,
        /// Path involved in the operation
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Version string does not match the `v<major>.<minor>.<patch>` pattern
    #[error("Malformed version string: {0:?} (expected v<major>.<minor>.<patch>)")]
    MalformedVersion(String),

    /// External command could not be spawned
    #[error("Failed to execute {command}: {error}")]
    CommandFailed {
        /// Command that failed to start
        command: String,
        /// Underlying IO error
        error: std::io::Error,
    },

    /// External command ran but exited with a non-zero status
    #[error("Command {command} exited with status {code:?}")]
    CommandStatus {
        /// Command that failed
        command: String,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
    },

    /// Required external tool not found on PATH
    #[error("Required tool not found: {0}")]
    ToolNotFound(String),

    /// Publish credential environment variable missing
    #[error("Missing credential environment variable: {0}")]
    MissingCredential(&'static str),

    /// HTTP errors from the marker endpoint or the upload client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Zip archive errors
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Version descriptor template errors
    #[error("Template error: {0}")]
    Template(String),
}

/// Bail out of the current function with a [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::packager::error::Error::GenericError(format!($($arg)*)))
    };
}

/// Extension trait attaching filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wrap an IO error with the operation being performed and the path involved.
    fn fs_context(self, operation: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, operation: &str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::FsError {
            operation: operation.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}
