//! Key identity and the keypair capability.
//!
//! Extracts RSA parameters from standard key encodings and fingerprints them
//! with MD5 over their MPI encodings. MD5 is kept for compatibility with
//! existing encrypted directories; it is a name, not a security boundary.

use std::fmt;
use std::sync::Arc;

use md5::{Digest, Md5};
use spki::der::Decode;
use spki::SubjectPublicKeyInfoRef;

use crate::error::{CipherError, CoreError, Result};
use crate::mpi::{bit_length, write_mpi};
use crate::types::KeyId;

/// Compute the key ID for an RSA public key.
///
/// Both integers are big-endian magnitudes. The digest input is
/// `mpi(exponent) || mpi(modulus)`, in that order.
pub fn compute_key_id(modulus: &[u8], exponent: &[u8]) -> Result<KeyId> {
    let mut input = Vec::with_capacity(modulus.len() + exponent.len() + 10);
    write_mpi(&mut input, exponent)?;
    write_mpi(&mut input, modulus)?;

    Ok(KeyId::from_digest(&Md5::digest(&input)))
}

/// The numeric parameters of an RSA public key.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    modulus: Vec<u8>,
    exponent: Vec<u8>,
}

impl RsaPublicKey {
    /// Create from big-endian modulus and exponent magnitudes.
    pub fn new(modulus: impl Into<Vec<u8>>, exponent: impl Into<Vec<u8>>) -> Self {
        Self {
            modulus: modulus.into(),
            exponent: exponent.into(),
        }
    }

    /// Parse a DER `SubjectPublicKeyInfo` holding an `rsaEncryption` key.
    pub fn from_spki_der(der: &[u8]) -> Result<Self> {
        let info = SubjectPublicKeyInfoRef::from_der(der)
            .map_err(|e| CoreError::InvalidDer(e.to_string()))?;

        if info.algorithm.oid != pkcs1::ALGORITHM_OID {
            return Err(CoreError::UnsupportedAlgorithm(info.algorithm.oid.to_string()));
        }

        let key_bytes = info.subject_public_key.as_bytes().ok_or_else(|| {
            CoreError::InvalidDer("subject public key is not byte aligned".to_string())
        })?;

        Self::from_pkcs1_der(key_bytes)
    }

    /// Parse a DER PKCS#1 `RSAPublicKey` (a sequence of modulus and exponent).
    pub fn from_pkcs1_der(der: &[u8]) -> Result<Self> {
        let key =
            pkcs1::RsaPublicKey::from_der(der).map_err(|e| CoreError::InvalidDer(e.to_string()))?;

        Ok(Self {
            modulus: key.modulus.as_bytes().to_vec(),
            exponent: key.public_exponent.as_bytes().to_vec(),
        })
    }

    /// Parse a PEM `PUBLIC KEY` (SPKI) or `RSA PUBLIC KEY` (PKCS#1) block.
    pub fn from_pem(pem_str: &str) -> Result<Self> {
        let block = pem::parse(pem_str).map_err(|e| CoreError::InvalidPem(e.to_string()))?;

        match block.tag() {
            "PUBLIC KEY" => Self::from_spki_der(block.contents()),
            "RSA PUBLIC KEY" => Self::from_pkcs1_der(block.contents()),
            other => Err(CoreError::InvalidPem(format!(
                "expected PUBLIC KEY, found {}",
                other
            ))),
        }
    }

    /// The modulus `n` as big-endian bytes.
    pub fn modulus(&self) -> &[u8] {
        &self.modulus
    }

    /// The public exponent `e` as big-endian bytes.
    pub fn exponent(&self) -> &[u8] {
        &self.exponent
    }

    /// Size of the key in bits.
    pub fn modulus_bits(&self) -> usize {
        bit_length(&self.modulus)
    }

    /// Compute this key's ID.
    pub fn key_id(&self) -> Result<KeyId> {
        compute_key_id(&self.modulus, &self.exponent)
    }
}

impl fmt::Debug for RsaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RsaPublicKey(bits={}, e={})",
            self.modulus_bits(),
            hex::encode(&self.exponent)
        )
    }
}

/// A certificate (and optionally private key) able to en/decrypt bytes.
///
/// The encrypted directory only ever talks to this trait, so the envelope
/// format and where the crypto happens (library, subprocess, remote key
/// service) are up to the implementation.
///
/// # Contract
///
/// - `key_id` is deterministic for a given certificate.
/// - `decrypt(encrypt(p)) == p` for the same keypair.
/// - Failures are reported, never retried.
pub trait Keypair: Send + Sync {
    /// The identity used to namespace this keypair's files.
    fn key_id(&self) -> &KeyId;

    /// Encrypt plaintext for this keypair's certificate.
    fn encrypt(&self, plaintext: &[u8]) -> std::result::Result<Vec<u8>, CipherError>;

    /// Decrypt ciphertext with this keypair's private key.
    fn decrypt(&self, ciphertext: &[u8]) -> std::result::Result<Vec<u8>, CipherError>;
}

impl<K: Keypair + ?Sized> Keypair for &K {
    fn key_id(&self) -> &KeyId {
        (**self).key_id()
    }

    fn encrypt(&self, plaintext: &[u8]) -> std::result::Result<Vec<u8>, CipherError> {
        (**self).encrypt(plaintext)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> std::result::Result<Vec<u8>, CipherError> {
        (**self).decrypt(ciphertext)
    }
}

impl<K: Keypair + ?Sized> Keypair for Box<K> {
    fn key_id(&self) -> &KeyId {
        (**self).key_id()
    }

    fn encrypt(&self, plaintext: &[u8]) -> std::result::Result<Vec<u8>, CipherError> {
        (**self).encrypt(plaintext)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> std::result::Result<Vec<u8>, CipherError> {
        (**self).decrypt(ciphertext)
    }
}

impl<K: Keypair + ?Sized> Keypair for Arc<K> {
    fn key_id(&self) -> &KeyId {
        (**self).key_id()
    }

    fn encrypt(&self, plaintext: &[u8]) -> std::result::Result<Vec<u8>, CipherError> {
        (**self).encrypt(plaintext)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> std::result::Result<Vec<u8>, CipherError> {
        (**self).decrypt(ciphertext)
    }
}
