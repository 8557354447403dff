//! Error types for modgate
//!
//! Library code returns `VerifyResult`; the binary wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for modgate operations
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Main error type for modgate operations
#[derive(Error, Debug)]
pub enum VerifyError {
    /// Project root is missing or not a directory
    #[error("project root not found: {path}")]
    ProjectNotFound { path: PathBuf },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// A configured pattern failed to compile
    #[error("invalid pattern '{pattern}' for rule '{rule}': {source}")]
    InvalidPattern {
        rule: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Unknown pass id requested on the command line
    #[error("unknown pass '{0}' (expected one of: boundary, descriptor, conventions, shading, scheduler)")]
    UnknownPass(String),

    /// Report file could not be written
    #[error("failed to write report {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// One or more passes reported errors
    #[error("build contracts violated:\n{message}")]
    ContractsViolated { message: String },
}
