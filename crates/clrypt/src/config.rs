//! Configuration: where the keypair and the encrypted directory live.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable naming the certificate file.
pub const CERT_ENV: &str = "CLRYPT_CERT";

/// Environment variable naming the private key file.
pub const KEY_ENV: &str = "CLRYPT_PK";

/// Environment variable naming the encrypted directory, overriding discovery.
pub const DIR_ENV: &str = "ENCRYPTED_DIR";

/// Directory name searched for when no directory is configured.
pub const DEFAULT_DIR_NAME: &str = "encrypted";

/// Configuration for a [`Clrypt`](crate::Clrypt) handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClryptConfig {
    /// Certificate file (PEM or DER).
    pub cert_path: PathBuf,
    /// Private key file (PEM or DER).
    pub key_path: PathBuf,
    /// Explicit encrypted directory. `None` means search upward for `dir_name`.
    pub encrypted_dir: Option<PathBuf>,
    /// Name of the directory looked for during discovery.
    pub dir_name: String,
}

impl ClryptConfig {
    pub fn new(cert_path: impl Into<PathBuf>, key_path: impl Into<PathBuf>) -> Self {
        Self {
            cert_path: cert_path.into(),
            key_path: key_path.into(),
            encrypted_dir: None,
            dir_name: DEFAULT_DIR_NAME.to_string(),
        }
    }

    /// Read `CLRYPT_CERT`, `CLRYPT_PK` and the optional `ENCRYPTED_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var_os(var))
    }

    /// Like [`from_env`](Self::from_env), with variables supplied by `lookup`.
    ///
    /// Empty values count as unset. Values are paths and need not be
    /// valid Unicode.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.is_empty());

        let cert_path = get(CERT_ENV).ok_or(ConfigError::MissingVar(CERT_ENV))?;
        let key_path = get(KEY_ENV).ok_or(ConfigError::MissingVar(KEY_ENV))?;

        let mut config = Self::new(cert_path, key_path);
        config.encrypted_dir = get(DIR_ENV).map(PathBuf::from);
        Ok(config)
    }

    /// Use this encrypted directory instead of searching for one.
    pub fn with_encrypted_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.encrypted_dir = Some(dir.into());
        self
    }

    /// Search for a directory with this name instead of `encrypted`.
    pub fn with_dir_name(mut self, name: impl Into<String>) -> Self {
        self.dir_name = name.into();
        self
    }

    /// Resolve the encrypted directory root.
    ///
    /// An explicit directory must exist. Otherwise `cwd` and its ancestors are
    /// searched for `dir_name`.
    pub fn resolve_encrypted_dir(&self, cwd: &Path) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.encrypted_dir {
            let dir = if dir.is_relative() { cwd.join(dir) } else { dir.clone() };
            if !dir.is_dir() {
                return Err(ConfigError::NotADirectory(dir));
            }
            return Ok(dir);
        }

        find_encrypted_directory(cwd, &self.dir_name).ok_or_else(|| {
            ConfigError::DirectoryNotFound {
                start: cwd.to_path_buf(),
                name: self.dir_name.clone(),
            }
        })
    }
}

/// Find the nearest `<ancestor>/<name>` directory, starting at `start`.
///
/// Starting inside the encrypted directory itself finds it through its
/// parent.
pub fn find_encrypted_directory(start: &Path, name: &str) -> Option<PathBuf> {
    let found = start
        .ancestors()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_dir());

    match &found {
        Some(dir) => tracing::debug!(path = %dir.display(), "found encrypted directory"),
        None => tracing::debug!(start = %start.display(), name, "no encrypted directory"),
    }
    found
}
