//! The Clrypt handle: an encrypted directory bound to a keypair.
//!
//! Build one at startup and pass it to whatever needs secrets. Clones share
//! the same directory and keypair.

use std::env;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clrypt_core::{KeyId, Keypair};
use clrypt_openssl::OpenSslKeypair;
use clrypt_store::{EncryptedDirectory, LogicalFile};
use serde::de::DeserializeOwned;

use crate::config::ClryptConfig;
use crate::error::{ConfigError, Result};

/// Handle for reading and writing secrets.
///
/// Files are addressed by `(group, name, ext)`; see
/// [`LogicalFile`] for the naming rules.
pub struct Clrypt<K = OpenSslKeypair> {
    directory: Arc<EncryptedDirectory<K>>,
}

impl<K> Clone for Clrypt<K> {
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
        }
    }
}

impl<K> std::fmt::Debug for Clrypt<K>
where
    K: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clrypt")
            .field("directory", &self.directory)
            .finish()
    }
}

impl Clrypt<OpenSslKeypair> {
    /// Load the keypair and locate the encrypted directory.
    ///
    /// Discovery starts from the current working directory.
    pub fn open(config: &ClryptConfig) -> Result<Self> {
        let cwd = env::current_dir().map_err(ConfigError::CurrentDir)?;
        Self::open_from(config, &cwd)
    }

    /// Like [`open`](Self::open), with discovery starting at `cwd`.
    pub fn open_from(config: &ClryptConfig, cwd: &Path) -> Result<Self> {
        let root = config.resolve_encrypted_dir(cwd)?;
        let keypair = OpenSslKeypair::from_files(&config.cert_path, &config.key_path)?;

        tracing::debug!(
            key_id = %keypair.key_id(),
            root = %root.display(),
            "opened encrypted directory"
        );

        Ok(Self::new(EncryptedDirectory::new(root, keypair)))
    }

    /// Configure from `CLRYPT_CERT`, `CLRYPT_PK` and `ENCRYPTED_DIR`.
    pub fn from_env() -> Result<Self> {
        Self::open(&ClryptConfig::from_env()?)
    }
}

impl<K: Keypair> Clrypt<K> {
    pub fn new(directory: EncryptedDirectory<K>) -> Self {
        Self {
            directory: Arc::new(directory),
        }
    }

    /// Key ID files are read and written under.
    pub fn key_id(&self) -> &KeyId {
        self.directory.key_id()
    }

    pub fn directory(&self) -> &EncryptedDirectory<K> {
        &self.directory
    }

    /// Path of the encrypted file for this key.
    pub fn file_path(&self, group: &str, name: &str, ext: &str) -> Result<PathBuf> {
        let file = LogicalFile::new(group, name, ext)?;
        Ok(self.directory.file_path(&file))
    }

    /// Decrypt a file and return its plaintext.
    pub fn read_file(&self, group: &str, name: &str, ext: &str) -> Result<Vec<u8>> {
        let file = LogicalFile::new(group, name, ext)?;
        Ok(self.directory.read_file(&file)?)
    }

    /// Decrypt a file and parse it as JSON (`json`) or YAML (anything else).
    pub fn read_structured_file<T: DeserializeOwned>(
        &self,
        group: &str,
        name: &str,
        ext: &str,
    ) -> Result<T> {
        let file = LogicalFile::new(group, name, ext)?;
        Ok(self.directory.read_structured_file(&file)?)
    }

    /// Encrypt everything read from `input` and store it, replacing any
    /// existing file. Returns the path written.
    pub fn write_file(&self, input: impl Read, group: &str, name: &str, ext: &str) -> Result<PathBuf> {
        let file = LogicalFile::new(group, name, ext)?;
        Ok(self.directory.write_file(input, &file)?)
    }
}
