//! # clrypt
//!
//! Secrets stored as individually encrypted files in a plain directory tree,
//! readable with a locally held private key.
//!
//! ## Overview
//!
//! Each file is encrypted for one X.509 certificate and named after that
//! certificate's key ID, so a single tree (often committed alongside the
//! code) holds copies of the same secret for several recipients:
//!
//! ```text
//! encrypted/
//!   dev/
//!     3d8b07fe4da280fc3d3c268ea344e5f9-database.yaml.smime
//!     4136d2d8b769cae493f54c3d07138dde-database.yaml.smime
//! ```
//!
//! ## Key Concepts
//!
//! - **Key ID**: MD5 fingerprint of the RSA modulus and exponent
//! - **Logical file**: `(group, name, ext)`, independent of the key
//! - **Keypair**: anything that can encrypt and decrypt for a key ID
//!
//! ## Usage
//!
//! ```rust,no_run
//! use clrypt::{Clrypt, ClryptConfig};
//!
//! fn example() -> clrypt::Result<()> {
//!     // CLRYPT_CERT / CLRYPT_PK, then search upward for `encrypted/`
//!     let clrypt = Clrypt::open(&ClryptConfig::from_env()?)?;
//!
//!     clrypt.write_file(&b"password: hunter2\n"[..], "dev", "database", "yaml")?;
//!     let value: serde_yaml::Value = clrypt.read_structured_file("dev", "database", "yaml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `clrypt::core` - Key IDs, MPI encoding, the `Keypair` trait
//! - `clrypt::store` - The encrypted directory
//! - `clrypt::openssl` - Certificate-backed keypair

pub mod clrypt;
pub mod config;
pub mod error;

// Re-export component crates
pub use clrypt_core as core;
pub use clrypt_openssl as openssl;
pub use clrypt_store as store;

pub use crate::clrypt::Clrypt;
pub use config::{
    find_encrypted_directory, ClryptConfig, CERT_ENV, DEFAULT_DIR_NAME, DIR_ENV, KEY_ENV,
};
pub use error::{ClryptError, ConfigError, Result};

// Commonly used types
pub use clrypt_core::{compute_key_id, CipherError, KeyId, Keypair};
pub use clrypt_openssl::OpenSslKeypair;
pub use clrypt_store::{EncryptedDirectory, LogicalFile, StoreError, DEFAULT_EXT};
