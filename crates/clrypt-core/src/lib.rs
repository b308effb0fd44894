//! # clrypt core
//!
//! Pure primitives for clrypt: key identity and the keypair capability.
//!
//! This crate contains no I/O. It turns RSA public key parameters into a
//! stable [`KeyId`] and defines the [`Keypair`] trait that the encrypted
//! directory relies on.
//!
//! ## Key Types
//!
//! - [`KeyId`] - Fingerprint of an RSA public key, used to namespace files
//! - [`RsaPublicKey`] - Modulus and exponent extracted from a `SubjectPublicKeyInfo`
//! - [`Keypair`] - Capability to identify, encrypt and decrypt
//!
//! ## Key identity
//!
//! The key ID is the MD5 of the exponent and the modulus, each in OpenSSL's
//! MPI format. See [`mpi`] and [`compute_key_id`]. The output is a
//! compatibility contract: every previously written file is named with it.

pub mod crypto;
pub mod error;
pub mod mpi;
pub mod types;

pub use crypto::{compute_key_id, Keypair, RsaPublicKey};
pub use error::{CipherError, CoreError, Result};
pub use mpi::{encode_mpi, write_mpi};
pub use types::KeyId;
