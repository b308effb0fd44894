//! Error types for the store module.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during encrypted directory operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No file encrypted for the active key exists at this path.
    #[error("encrypted file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The keypair rejected the ciphertext.
    #[error("could not decrypt {}: {reason}", path.display())]
    Decryption { path: PathBuf, reason: String },

    /// The keypair failed to encrypt the plaintext.
    #[error("encryption error: {0}")]
    Encryption(String),

    /// Decrypted content did not parse as the declared format.
    #[error("could not parse {}: {reason}", path.display())]
    Deserialization { path: PathBuf, reason: String },

    /// Group, name or extension cannot be mapped to a path.
    #[error("invalid file name: {0}")]
    InvalidName(String),

    /// Reading the plaintext input failed.
    #[error("failed to read input: {0}")]
    Input(#[source] std::io::Error),

    /// Filesystem error at the given path.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Whether this error means the secret is simply absent for this key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
