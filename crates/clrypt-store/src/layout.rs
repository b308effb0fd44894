//! On-disk layout of an encrypted directory.
//!
//! A logical file `(group, name, ext)` encrypted for key `key_id` lives at:
//!
//! ```text
//! <root>/<group>/<key_id>-<name>.<ext>.smime
//! ```
//!
//! The key ID prefix lets one tree hold copies of the same secret for
//! several recipients. A reader only ever looks up files for its own key.
//! This layout is shared with every existing encrypted directory and must
//! not change.

use std::path::{Component, Path, PathBuf};

use clrypt_core::KeyId;

use crate::error::{Result, StoreError};

/// Suffix marking a file as an encrypted envelope.
pub const ENCRYPTED_SUFFIX: &str = "smime";

/// Extension used when the caller does not name one.
pub const DEFAULT_EXT: &str = "yaml";

/// A secret's logical address, independent of the key it is encrypted for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogicalFile {
    group: String,
    name: String,
    ext: String,
}

impl LogicalFile {
    /// Create a logical file reference.
    ///
    /// `group` is a relative path and may be nested (`team/service`) or
    /// empty. `name` and `ext` are single path segments.
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        ext: impl Into<String>,
    ) -> Result<Self> {
        let file = Self {
            group: group.into(),
            name: name.into(),
            ext: ext.into(),
        };
        file.validate()?;
        Ok(file)
    }

    /// Create a logical file with the default `yaml` extension.
    pub fn yaml(group: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        Self::new(group, name, DEFAULT_EXT)
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ext(&self) -> &str {
        &self.ext
    }

    /// File name for this logical file under the given key.
    pub fn file_name(&self, key_id: &KeyId) -> String {
        format!("{}-{}.{}.{}", key_id, self.name, self.ext, ENCRYPTED_SUFFIX)
    }

    /// Path relative to the encrypted directory root.
    pub fn relative_path(&self, key_id: &KeyId) -> PathBuf {
        Path::new(&self.group).join(self.file_name(key_id))
    }

    fn validate(&self) -> Result<()> {
        for component in Path::new(&self.group).components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => {
                    return Err(StoreError::InvalidName(format!(
                        "group must be a relative path inside the directory: {}",
                        self.group
                    )))
                }
            }
        }

        validate_segment("name", &self.name)?;
        validate_segment("extension", &self.ext)
    }
}

fn validate_segment(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(StoreError::InvalidName(format!("{} cannot be empty", what)));
    }
    if value.contains(['/', '\\']) {
        return Err(StoreError::InvalidName(format!(
            "{} cannot contain a path separator: {}",
            what, value
        )));
    }
    Ok(())
}
