//! # clrypt testkit
//!
//! Testing utilities for clrypt.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: MPI encodings and key IDs that must never change
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A dummy keypair, temporary encrypted directories, and
//!   checked-in test certificates
//!
//! ## Golden Vectors
//!
//! ```rust
//! use clrypt_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, actual) in verify_all_vectors() {
//!     assert!(matches, "{}: {}", name, actual);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use clrypt_testkit::generators::{logical_file, plaintext};
//! use clrypt_testkit::TestDirectory;
//!
//! proptest! {
//!     #[test]
//!     fn write_then_read(file in logical_file(), data in plaintext(256)) {
//!         let fixture = TestDirectory::new();
//!         fixture.directory().write_bytes(&data, &file).unwrap();
//!         prop_assert_eq!(fixture.directory().read_file(&file).unwrap(), data);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use clrypt_testkit::fixtures::{DummyKeypair, TestDirectory};
//! use clrypt_store::LogicalFile;
//!
//! let fixture = TestDirectory::new();
//! let file = LogicalFile::yaml("dev", "secrets1").unwrap();
//! fixture.directory().write_bytes(b"another secret datum", &file).unwrap();
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{
    alt_openssl_keypair, fixture_path, multi_party_keypairs, openssl_keypair, DummyKeypair,
    TestDirectory, ALT_KEY_ID, CONTENT_PLAINTEXT, TEST_KEY_ID,
};
pub use vectors::{verify_all_vectors, REFERENCE_KEY_ID, REFERENCE_MODULUS_HEX};
