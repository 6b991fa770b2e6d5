//! Error types for the ArchLens crate.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur inside ArchLens.
#[derive(Debug, Error)]
pub enum ArchLensError {
    /// I/O failure while reading source files or writing a report.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An import-matching pattern failed to compile.
    #[error("invalid import pattern: {0}")]
    PatternInit(#[from] regex::Error),

    /// Report serialization failed.
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The scan root does not exist or is not a directory.
    #[error("invalid scan root: {0:?}")]
    InvalidRoot(PathBuf),

    /// Configuration file was present but unreadable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ArchLensError>;
