//! Parsing of decrypted content into structured values.

use serde::de::DeserializeOwned;

/// Document format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Pick the parser for an extension.
    ///
    /// Anything that is not JSON is read as YAML, which was the only format
    /// historically stored and also accepts JSON documents.
    pub fn from_ext(ext: &str) -> Self {
        if ext.eq_ignore_ascii_case("json") {
            Format::Json
        } else {
            Format::Yaml
        }
    }

    /// Parse plaintext bytes.
    pub fn parse<T: DeserializeOwned>(self, bytes: &[u8]) -> Result<T, String> {
        match self {
            Format::Yaml => serde_yaml::from_slice(bytes).map_err(|e| e.to_string()),
            Format::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
        }
    }
}
