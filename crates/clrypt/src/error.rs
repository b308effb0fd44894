//! Error types for the clrypt API.

use std::path::PathBuf;

use clrypt_openssl::KeypairError;
use clrypt_store::StoreError;
use thiserror::Error;

/// Configuration could not be resolved.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    /// No encrypted directory in the start directory or any ancestor.
    #[error("no `{name}` directory found in {} or its parents", start.display())]
    DirectoryNotFound { start: PathBuf, name: String },

    /// The configured encrypted directory is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The working directory could not be determined.
    #[error("cannot determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

/// Errors that can occur in clrypt operations.
#[derive(Debug, Error)]
pub enum ClryptError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Keypair loading error.
    #[error("keypair error: {0}")]
    Keypair(#[from] KeypairError),

    /// Encrypted directory error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl ClryptError {
    /// Whether the requested secret does not exist for the active key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClryptError::Store(e) if e.is_not_found())
    }
}

/// Result type for clrypt operations.
pub type Result<T> = std::result::Result<T, ClryptError>;
