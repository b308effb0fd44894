//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::path::{Path, PathBuf};

use clrypt_core::{CipherError, KeyId, Keypair};
use clrypt_openssl::OpenSslKeypair;
use clrypt_store::EncryptedDirectory;
use tempfile::TempDir;

/// Key ID of `fixtures/test.crt` (2048-bit, e = 65537).
pub const TEST_KEY_ID: &str = "3d8b07fe4da280fc3d3c268ea344e5f9";

/// Key ID of `fixtures/alt.crt` (2047-bit, e = 3).
pub const ALT_KEY_ID: &str = "4136d2d8b769cae493f54c3d07138dde";

/// Plaintext of `fixtures/content.smime`.
pub const CONTENT_PLAINTEXT: &[u8] = b"test content";

/// Path of a checked-in fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

/// Keypair for `fixtures/test.crt` and `fixtures/test.key`.
pub fn openssl_keypair() -> OpenSslKeypair {
    OpenSslKeypair::from_files(fixture_path("test.crt"), fixture_path("test.key"))
        .expect("test fixture keypair loads")
}

/// Keypair for `fixtures/alt.crt` and `fixtures/alt.key`.
pub fn alt_openssl_keypair() -> OpenSslKeypair {
    OpenSslKeypair::from_files(fixture_path("alt.crt"), fixture_path("alt.key"))
        .expect("alt fixture keypair loads")
}

/// Reversible stand-in for a real keypair.
///
/// `encrypt(x)` is `"E:" + x`; `decrypt` strips the prefix and refuses input
/// without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DummyKeypair {
    key_id: KeyId,
}

impl DummyKeypair {
    /// Marker prepended to every "ciphertext".
    pub const PREFIX: &'static [u8] = b"E:";

    /// Dummy keypair with key ID `dummy12345`.
    pub fn new() -> Self {
        Self::with_key_id("dummy12345")
    }

    pub fn with_key_id(key_id: impl Into<KeyId>) -> Self {
        Self {
            key_id: key_id.into(),
        }
    }
}

impl Default for DummyKeypair {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypair for DummyKeypair {
    fn key_id(&self) -> &KeyId {
        &self.key_id
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let mut out = Self::PREFIX.to_vec();
        out.extend_from_slice(plaintext);
        Ok(out)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        ciphertext
            .strip_prefix(Self::PREFIX)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| CipherError::Decryption("missing E: prefix".to_string()))
    }
}

/// An encrypted directory rooted in a fresh temporary directory.
///
/// The directory is removed when the fixture is dropped.
pub struct TestDirectory<K = DummyKeypair> {
    tmp: TempDir,
    directory: EncryptedDirectory<K>,
}

impl TestDirectory<DummyKeypair> {
    /// Temporary directory with the default dummy keypair.
    pub fn new() -> Self {
        Self::with_keypair(DummyKeypair::new())
    }
}

impl Default for TestDirectory<DummyKeypair> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Keypair> TestDirectory<K> {
    pub fn with_keypair(keypair: K) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let directory = EncryptedDirectory::new(tmp.path(), keypair);
        Self { tmp, directory }
    }

    /// Root of the temporary tree.
    pub fn path(&self) -> &Path {
        self.tmp.path()
    }

    pub fn directory(&self) -> &EncryptedDirectory<K> {
        &self.directory
    }

    /// Another view of the same tree, bound to a different keypair.
    pub fn sibling<K2: Keypair>(&self, keypair: K2) -> EncryptedDirectory<K2> {
        EncryptedDirectory::new(self.tmp.path(), keypair)
    }
}

/// Dummy keypairs with distinct key IDs (`dummy0`, `dummy1`, ...).
pub fn multi_party_keypairs(count: usize) -> Vec<DummyKeypair> {
    (0..count)
        .map(|i| DummyKeypair::with_key_id(format!("dummy{}", i)))
        .collect()
}
