//! # clrypt store
//!
//! Encrypted directory for clrypt. Maps logical `(group, name, ext)` files to
//! paths namespaced by the active key ID and reads/writes them through a
//! [`Keypair`](clrypt_core::Keypair).
//!
//! ## Key Types
//!
//! - [`EncryptedDirectory`] - A root path bound to a keypair
//! - [`LogicalFile`] - A secret's address independent of any key
//! - [`StoreError`] - Distinguishes "not found" from decryption and I/O failures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use clrypt_core::Keypair;
//! use clrypt_store::{EncryptedDirectory, LogicalFile, StoreError};
//!
//! fn example<K: Keypair>(keypair: K) -> Result<(), StoreError> {
//!     let dir = EncryptedDirectory::new("encrypted", keypair);
//!     let file = LogicalFile::yaml("dev", "database")?;
//!
//!     dir.write_bytes(b"password: hunter2\n", &file)?;
//!     let plaintext = dir.read_file(&file)?;
//!     assert_eq!(plaintext, b"password: hunter2\n");
//!     Ok(())
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Key-namespaced files**: `<root>/<group>/<key_id>-<name>.<ext>.smime`
//! - **No index**: every call hits the filesystem
//! - **Whole-file crypto**: content is loaded fully before decryption
//! - **Last writer wins**: no locking

pub mod directory;
pub mod error;
pub mod layout;
pub mod structured;

pub use directory::EncryptedDirectory;
pub use error::{Result, StoreError};
pub use layout::{LogicalFile, DEFAULT_EXT, ENCRYPTED_SUFFIX};
pub use structured::Format;
