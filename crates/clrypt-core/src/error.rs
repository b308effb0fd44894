//! Error types for clrypt core.

use thiserror::Error;

/// Errors that can occur while deriving key identity.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid PEM: {0}")]
    InvalidPem(String),

    #[error("invalid DER: {0}")]
    InvalidDer(String),

    #[error("unsupported public key algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("integer of {0} bytes does not fit an MPI length field")]
    IntegerTooLarge(usize),
}

/// Failure reported by a [`Keypair`](crate::Keypair) encrypt or decrypt call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("decryption failed: {0}")]
    Decryption(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
