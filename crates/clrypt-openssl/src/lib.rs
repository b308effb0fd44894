//! # clrypt OpenSSL keypair
//!
//! The production [`Keypair`](clrypt_core::Keypair) for clrypt. An RSA X.509
//! certificate identifies the recipient and a private key decrypts.
//!
//! ## Envelope Format
//!
//! Content is wrapped in PKCS#7 enveloped data and written in S/MIME form,
//! the same bytes `openssl smime -encrypt -binary` produces. Files written by
//! older tools decrypt unchanged.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use clrypt_core::Keypair;
//! use clrypt_openssl::OpenSslKeypair;
//!
//! let keypair = OpenSslKeypair::from_files("cert.pem", "key.pem").unwrap();
//! println!("key id: {}", keypair.key_id());
//!
//! let ciphertext = keypair.encrypt(b"secret").unwrap();
//! assert_eq!(keypair.decrypt(&ciphertext).unwrap(), b"secret");
//! ```

pub mod envelope;
pub mod error;
pub mod keypair;

pub use error::{KeypairError, Result};
pub use keypair::{load_certificate, load_private_key, OpenSslKeypair};
