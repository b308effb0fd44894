//! OpenSslKeypair: an X.509 certificate and private key that can en/decrypt
//! arbitrary bytes.

use std::fmt;
use std::fs;
use std::path::Path;

use clrypt_core::{CipherError, KeyId, Keypair, RsaPublicKey};
use openssl::pkey::{PKey, Private};
use openssl::symm::Cipher;
use openssl::x509::{X509Ref, X509};

use crate::envelope;
use crate::error::{KeypairError, Result};

/// A certificate and, for decryption, its private key.
///
/// The key ID is computed once, from the certificate's public key, when the
/// keypair is built.
pub struct OpenSslKeypair {
    certificate: X509,
    private_key: Option<PKey<Private>>,
    key_id: KeyId,
    cipher: Cipher,
}

impl OpenSslKeypair {
    /// Build a keypair from a certificate and an optional private key.
    ///
    /// Fails if the private key does not belong to the certificate, or the
    /// certificate does not hold an RSA key.
    pub fn new(certificate: X509, private_key: Option<PKey<Private>>) -> Result<Self> {
        let public_key = certificate
            .public_key()
            .map_err(|e| KeypairError::Certificate(e.to_string()))?;

        if let Some(key) = &private_key {
            if !public_key.public_eq(key) {
                return Err(KeypairError::KeyMismatch);
            }
        }

        let spki = public_key
            .public_key_to_der()
            .map_err(|e| KeypairError::Certificate(e.to_string()))?;
        let key_id = RsaPublicKey::from_spki_der(&spki)?.key_id()?;

        Ok(Self {
            certificate,
            private_key,
            key_id,
            // 3DES keeps files readable by older clrypt installs
            cipher: Cipher::des_ede3_cbc(),
        })
    }

    /// Load a certificate and private key from files (PEM or DER).
    pub fn from_files(cert_path: impl AsRef<Path>, key_path: impl AsRef<Path>) -> Result<Self> {
        let certificate = load_certificate(cert_path.as_ref())?;
        let private_key = load_private_key(key_path.as_ref())?;
        Self::new(certificate, Some(private_key))
    }

    /// Load only a certificate. The result can encrypt but not decrypt.
    pub fn encrypt_only(cert_path: impl AsRef<Path>) -> Result<Self> {
        Self::from_certificate(load_certificate(cert_path.as_ref())?)
    }

    /// Encrypt-only keypair for an already parsed certificate.
    pub fn from_certificate(certificate: X509) -> Result<Self> {
        Self::new(certificate, None)
    }

    /// Build a keypair from PEM-encoded certificate and private key.
    pub fn from_pem(cert_pem: &[u8], key_pem: &[u8]) -> Result<Self> {
        let certificate =
            X509::from_pem(cert_pem).map_err(|e| KeypairError::Certificate(e.to_string()))?;
        let private_key = PKey::private_key_from_pem(key_pem)
            .map_err(|e| KeypairError::PrivateKey(e.to_string()))?;
        Self::new(certificate, Some(private_key))
    }

    /// Use a different content cipher for newly written files.
    ///
    /// Decryption reads the cipher from the envelope, so existing files stay
    /// readable whatever is chosen here.
    pub fn with_cipher(mut self, cipher: Cipher) -> Self {
        self.cipher = cipher;
        self
    }

    /// The recipient certificate.
    pub fn certificate(&self) -> &X509Ref {
        &self.certificate
    }

    /// Whether a private key is loaded.
    pub fn can_decrypt(&self) -> bool {
        self.private_key.is_some()
    }
}

impl Keypair for OpenSslKeypair {
    fn key_id(&self) -> &KeyId {
        &self.key_id
    }

    fn encrypt(&self, plaintext: &[u8]) -> std::result::Result<Vec<u8>, CipherError> {
        envelope::seal(&self.certificate, plaintext, self.cipher)
            .map_err(|e| CipherError::Encryption(e.to_string()))
    }

    fn decrypt(&self, ciphertext: &[u8]) -> std::result::Result<Vec<u8>, CipherError> {
        let key = self
            .private_key
            .as_ref()
            .ok_or_else(|| CipherError::Decryption("no private key loaded".to_string()))?;

        if !envelope::is_smime(ciphertext) {
            tracing::debug!(key_id = %self.key_id, "ciphertext has no S/MIME header");
        }

        envelope::open(ciphertext, key, &self.certificate)
            .map_err(|e| CipherError::Decryption(e.to_string()))
    }
}

impl fmt::Debug for OpenSslKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenSslKeypair")
            .field("key_id", &self.key_id)
            .field("can_decrypt", &self.can_decrypt())
            .finish()
    }
}

/// Read an X.509 certificate in PEM or DER form.
pub fn load_certificate(path: &Path) -> Result<X509> {
    let bytes = read(path)?;
    let parsed = if is_pem(&bytes) {
        X509::from_pem(&bytes)
    } else {
        X509::from_der(&bytes)
    };
    parsed.map_err(|e| KeypairError::Certificate(format!("{}: {}", path.display(), e)))
}

/// Read a private key in PEM or DER form (PKCS#8 or PKCS#1).
pub fn load_private_key(path: &Path) -> Result<PKey<Private>> {
    let bytes = read(path)?;
    let parsed = if is_pem(&bytes) {
        PKey::private_key_from_pem(&bytes)
    } else {
        PKey::private_key_from_der(&bytes)
    };
    parsed.map_err(|e| KeypairError::PrivateKey(format!("{}: {}", path.display(), e)))
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| KeypairError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn is_pem(bytes: &[u8]) -> bool {
    bytes.windows(10).any(|w| w == b"-----BEGIN")
}
