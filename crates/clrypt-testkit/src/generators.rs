//! Proptest generators for property-based testing.

use proptest::prelude::*;

use clrypt_core::KeyId;
use clrypt_store::LogicalFile;

/// Big-endian magnitude of up to `max_len` bytes, leading zeros allowed.
pub fn magnitude(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Magnitude with a nonzero leading byte.
pub fn canonical_magnitude(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    (1u8..=255, magnitude(max_len.saturating_sub(1))).prop_map(|(lead, rest)| {
        let mut bytes = vec![lead];
        bytes.extend(rest);
        bytes
    })
}

/// A 32-character lowercase hex key ID.
pub fn key_id() -> impl Strategy<Value = KeyId> {
    any::<[u8; 16]>().prop_map(|digest| KeyId::from_digest(&digest))
}

/// A single path segment usable as a name or group component.
pub fn segment() -> impl Strategy<Value = String> {
    "[a-z0-9_][a-z0-9_-]{0,15}"
}

/// A group of zero to three segments (`""`, `dev`, `team/service`, ...).
pub fn group() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 0..=3).prop_map(|parts| parts.join("/"))
}

/// A file extension, biased towards the structured formats.
pub fn ext() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("yaml".to_string()),
        Just("yml".to_string()),
        Just("json".to_string()),
        "[a-z]{1,5}",
    ]
}

/// A valid logical file.
pub fn logical_file() -> impl Strategy<Value = LogicalFile> {
    (group(), segment(), ext()).prop_map(|(group, name, ext)| {
        LogicalFile::new(group, name, ext).expect("generated names are valid")
    })
}

/// Plaintext bytes of up to `max_len` bytes.
pub fn plaintext(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}
