//! Error types for loading OpenSSL keypairs.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a certificate and private key.
#[derive(Debug, Error)]
pub enum KeypairError {
    /// Key material could not be read from disk.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Certificate is not valid PEM or DER X.509.
    #[error("invalid certificate: {0}")]
    Certificate(String),

    /// Private key is not valid PEM or DER.
    #[error("invalid private key: {0}")]
    PrivateKey(String),

    /// Private key belongs to a different certificate.
    #[error("private key does not match the certificate")]
    KeyMismatch,

    /// Key ID could not be derived from the certificate's public key.
    #[error("key identity error: {0}")]
    KeyId(#[from] clrypt_core::CoreError),
}

/// Result type for keypair loading.
pub type Result<T> = std::result::Result<T, KeypairError>;
