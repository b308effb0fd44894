//! EncryptedDirectory: encrypted files namespaced by key identity.
//!
//! Every call goes straight to the filesystem. There is no cache or index,
//! and no locking: concurrent writers to the same file race and the last
//! one wins.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clrypt_core::{KeyId, Keypair};
use serde::de::DeserializeOwned;

use crate::error::{Result, StoreError};
use crate::layout::LogicalFile;
use crate::structured::Format;

/// A directory of files encrypted for one keypair.
///
/// The root path and keypair are fixed at construction.
#[derive(Debug, Clone)]
pub struct EncryptedDirectory<K> {
    root: PathBuf,
    keypair: K,
}

impl<K: Keypair> EncryptedDirectory<K> {
    /// Bind a root directory to a keypair. Nothing is touched on disk.
    pub fn new(root: impl Into<PathBuf>, keypair: K) -> Self {
        Self {
            root: root.into(),
            keypair,
        }
    }

    /// The encrypted directory root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The keypair files are read and written with.
    pub fn keypair(&self) -> &K {
        &self.keypair
    }

    /// The key ID that namespaces this directory's view of the tree.
    pub fn key_id(&self) -> &KeyId {
        self.keypair.key_id()
    }

    /// Path of the encrypted file for a logical file. Performs no I/O.
    pub fn file_path(&self, file: &LogicalFile) -> PathBuf {
        self.root.join(file.relative_path(self.keypair.key_id()))
    }

    /// Check whether a file encrypted for this key exists.
    pub fn exists(&self, file: &LogicalFile) -> bool {
        self.file_path(file).is_file()
    }

    /// Read and decrypt a file.
    ///
    /// # Errors
    /// - `NotFound` if nothing is stored for this key under that name.
    /// - `Io` for any other read failure.
    /// - `Decryption` if the keypair rejects the ciphertext.
    pub fn read_file(&self, file: &LogicalFile) -> Result<Vec<u8>> {
        let path = self.file_path(file);

        let ciphertext = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound { path });
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        tracing::debug!(key_id = %self.key_id(), path = %path.display(), "decrypting file");

        self.keypair.decrypt(&ciphertext).map_err(|e| {
            tracing::warn!(path = %path.display(), "decryption failed: {}", e);
            StoreError::Decryption {
                path,
                reason: e.to_string(),
            }
        })
    }

    /// Read, decrypt and parse a file according to its extension.
    ///
    /// Ask for `serde_yaml::Value` to get an untyped document tree.
    pub fn read_structured_file<T: DeserializeOwned>(&self, file: &LogicalFile) -> Result<T> {
        let plaintext = self.read_file(file)?;

        Format::from_ext(file.ext())
            .parse(&plaintext)
            .map_err(|reason| StoreError::Deserialization {
                path: self.file_path(file),
                reason,
            })
    }

    /// Encrypt the full contents of `input` and write them to a file.
    ///
    /// Missing group directories are created. An existing file is replaced.
    /// Returns the path written.
    pub fn write_file(&self, mut input: impl Read, file: &LogicalFile) -> Result<PathBuf> {
        let mut plaintext = Vec::new();
        input.read_to_end(&mut plaintext).map_err(StoreError::Input)?;

        self.write_bytes(&plaintext, file)
    }

    /// Encrypt `plaintext` and write it to a file.
    pub fn write_bytes(&self, plaintext: &[u8], file: &LogicalFile) -> Result<PathBuf> {
        // Encrypt before touching the filesystem so a failure leaves nothing behind
        let ciphertext = self
            .keypair
            .encrypt(plaintext)
            .map_err(|e| StoreError::Encryption(e.to_string()))?;

        let path = self.file_path(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&path, &ciphertext).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(key_id = %self.key_id(), path = %path.display(), "wrote encrypted file");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clrypt_core::CipherError;
    use proptest::prelude::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    /// Reversible stand-in for real encryption.
    struct DummyKeypair {
        key_id: KeyId,
    }

    impl DummyKeypair {
        fn new(id: &str) -> Self {
            Self {
                key_id: KeyId::new(id),
            }
        }
    }

    impl Keypair for DummyKeypair {
        fn key_id(&self) -> &KeyId {
            &self.key_id
        }

        fn encrypt(&self, plaintext: &[u8]) -> std::result::Result<Vec<u8>, CipherError> {
            let mut out = b"E:".to_vec();
            out.extend_from_slice(plaintext);
            Ok(out)
        }

        fn decrypt(&self, ciphertext: &[u8]) -> std::result::Result<Vec<u8>, CipherError> {
            ciphertext
                .strip_prefix(b"E:")
                .map(<[u8]>::to_vec)
                .ok_or_else(|| CipherError::Decryption("missing E: prefix".to_string()))
        }
    }

    struct BrokenKeypair(KeyId);

    impl Keypair for BrokenKeypair {
        fn key_id(&self) -> &KeyId {
            &self.0
        }

        fn encrypt(&self, _: &[u8]) -> std::result::Result<Vec<u8>, CipherError> {
            Err(CipherError::Encryption("no recipient".to_string()))
        }

        fn decrypt(&self, _: &[u8]) -> std::result::Result<Vec<u8>, CipherError> {
            Err(CipherError::Decryption("no private key".to_string()))
        }
    }

    fn temp_directory() -> (EncryptedDirectory<DummyKeypair>, TempDir) {
        let temp = TempDir::new().unwrap();
        let dir = EncryptedDirectory::new(temp.path(), DummyKeypair::new("dummy12345"));
        (dir, temp)
    }

    fn put_raw(path: &Path, bytes: &[u8]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, bytes).unwrap();
    }

    #[test]
    fn test_file_path() {
        let dir = EncryptedDirectory::new("/enc", DummyKeypair::new("dummy12345"));
        let file = LogicalFile::new("dev", "secrets1", "yaml").unwrap();
        assert_eq!(
            dir.file_path(&file),
            PathBuf::from("/enc/dev/dummy12345-secrets1.yaml.smime")
        );
    }

    #[test]
    fn test_read_file() {
        let (dir, _temp) = temp_directory();
        let file = LogicalFile::yaml("dev", "secrets2").unwrap();
        put_raw(&dir.file_path(&file), b"E:some secret data");

        assert_eq!(dir.read_file(&file).unwrap(), b"some secret data");
    }

    #[test]
    fn test_read_structured_file() {
        #[derive(Debug, Deserialize, PartialEq)]
        #[serde(rename_all = "camelCase")]
        struct Root {
            root_key: Sub,
        }

        #[derive(Debug, Deserialize, PartialEq)]
        #[serde(rename_all = "camelCase")]
        struct Sub {
            sub_key1: String,
            sub_key2: i64,
        }

        let (dir, _temp) = temp_directory();
        let file = LogicalFile::yaml("dev", "secrets3").unwrap();
        put_raw(
            &dir.file_path(&file),
            b"E:rootKey:\n  subKey1: value\n  subKey2: 123\n",
        );

        let parsed: Root = dir.read_structured_file(&file).unwrap();
        assert_eq!(
            parsed,
            Root {
                root_key: Sub {
                    sub_key1: "value".to_string(),
                    sub_key2: 123,
                },
            }
        );

        let tree: serde_yaml::Value = dir.read_structured_file(&file).unwrap();
        assert_eq!(tree["rootKey"]["subKey2"].as_i64(), Some(123));
    }

    #[test]
    fn test_read_json_file() {
        let (dir, _temp) = temp_directory();
        let file = LogicalFile::new("dev", "config", "json").unwrap();
        dir.write_bytes(br#"{"token": "abc", "retries": 3}"#, &file).unwrap();

        let value: serde_json::Value = dir.read_structured_file(&file).unwrap();
        assert_eq!(value["token"], "abc");
        assert_eq!(value["retries"], 3);
    }

    #[test]
    fn test_write_file() {
        let (dir, _temp) = temp_directory();
        let file = LogicalFile::yaml("dev", "secrets4").unwrap();
        let contents = b"another secret datum";

        let written = dir.write_file(&contents[..], &file).unwrap();

        assert_eq!(written, dir.file_path(&file));
        assert_eq!(fs::read(&written).unwrap(), b"E:another secret datum");
        assert_eq!(dir.read_file(&file).unwrap(), contents);
    }

    #[test]
    fn test_overwrite_replaces_content() {
        let (dir, _temp) = temp_directory();
        let file = LogicalFile::yaml("dev", "rotating").unwrap();

        dir.write_bytes(b"a much longer first value", &file).unwrap();
        dir.write_bytes(b"short", &file).unwrap();

        assert_eq!(fs::read(dir.file_path(&file)).unwrap(), b"E:short");
    }

    #[test]
    fn test_write_creates_nested_groups() {
        let (dir, temp) = temp_directory();
        let file = LogicalFile::yaml("team/service/prod", "db").unwrap();

        dir.write_bytes(b"password: hunter2", &file).unwrap();

        assert!(temp.path().join("team/service/prod").is_dir());
        assert!(dir.exists(&file));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let (dir, _temp) = temp_directory();
        let file = LogicalFile::yaml("dev", "absent").unwrap();

        let err = dir.read_file(&file).unwrap_err();
        assert!(err.is_not_found(), "unexpected error: {}", err);
        assert!(!dir.exists(&file));
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        let (dir, _temp) = temp_directory();
        let file = LogicalFile::yaml("dev", "shadowed").unwrap();

        // A directory sitting where the encrypted file should be
        let path = dir.file_path(&file);
        fs::create_dir_all(&path).unwrap();

        match dir.read_file(&file).unwrap_err() {
            StoreError::Io { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("expected Io, got {:?}", other),
        }
    }

    #[test]
    fn test_group_under_regular_file_is_io_error() {
        let (dir, temp) = temp_directory();
        fs::write(temp.path().join("dev"), b"not a directory").unwrap();

        let file = LogicalFile::yaml("dev/sub", "token").unwrap();
        match dir.write_bytes(b"value", &file).unwrap_err() {
            StoreError::Io { path, .. } => assert_eq!(path, temp.path().join("dev/sub")),
            other => panic!("expected Io, got {:?}", other),
        }
    }

    #[test]
    fn test_rejected_ciphertext_is_decryption_error() {
        let (dir, _temp) = temp_directory();
        let file = LogicalFile::yaml("dev", "corrupt").unwrap();
        put_raw(&dir.file_path(&file), b"not for this key");

        let err = dir.read_file(&file).unwrap_err();
        assert!(matches!(err, StoreError::Decryption { .. }));
    }

    #[test]
    fn test_bad_document_is_deserialization_error() {
        let (dir, _temp) = temp_directory();
        let file = LogicalFile::yaml("dev", "broken").unwrap();
        dir.write_bytes(b"key: [unclosed", &file).unwrap();

        let err = dir.read_structured_file::<serde_yaml::Value>(&file).unwrap_err();
        assert!(matches!(err, StoreError::Deserialization { .. }));
    }

    #[test]
    fn test_encryption_failure_leaves_nothing() {
        let temp = TempDir::new().unwrap();
        let dir = EncryptedDirectory::new(temp.path(), BrokenKeypair(KeyId::new("broken")));
        let file = LogicalFile::yaml("dev", "secret").unwrap();

        let err = dir.write_bytes(b"value", &file).unwrap_err();
        assert!(matches!(err, StoreError::Encryption(_)));
        assert!(!temp.path().join("dev").exists());
    }

    #[test]
    fn test_input_errors_are_reported() {
        struct FailingReader;

        impl Read for FailingReader {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
        }

        let (dir, _temp) = temp_directory();
        let file = LogicalFile::yaml("dev", "secret").unwrap();

        let err = dir.write_file(FailingReader, &file).unwrap_err();
        assert!(matches!(err, StoreError::Input(_)));
        assert!(!dir.exists(&file));
    }

    #[test]
    fn test_keypairs_do_not_see_each_other() {
        let temp = TempDir::new().unwrap();
        let alice = EncryptedDirectory::new(temp.path(), DummyKeypair::new("alice"));
        let bob = EncryptedDirectory::new(temp.path(), DummyKeypair::new("bob"));
        let file = LogicalFile::yaml("shared", "token").unwrap();

        assert_ne!(alice.file_path(&file), bob.file_path(&file));

        alice.write_bytes(b"for alice", &file).unwrap();
        assert!(bob.read_file(&file).unwrap_err().is_not_found());

        bob.write_bytes(b"for bob", &file).unwrap();
        assert_eq!(alice.read_file(&file).unwrap(), b"for alice");
        assert_eq!(bob.read_file(&file).unwrap(), b"for bob");
    }

    proptest! {
        #[test]
        fn test_write_then_read(
            plaintext in prop::collection::vec(any::<u8>(), 0..512),
            group in "[a-z]{1,8}(/[a-z]{1,8}){0,2}",
            name in "[a-z0-9_-]{1,16}",
        ) {
            let (dir, _temp) = temp_directory();
            let file = LogicalFile::yaml(group, name).unwrap();

            dir.write_bytes(&plaintext, &file).unwrap();
            prop_assert_eq!(dir.read_file(&file).unwrap(), plaintext);
        }
    }
}
