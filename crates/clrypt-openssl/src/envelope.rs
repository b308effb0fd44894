//! S/MIME envelope.
//!
//! Files hold PKCS#7 enveloped data in S/MIME form, the same format the
//! `openssl smime -encrypt` command writes. Content is handled in binary
//! mode so bytes round-trip unchanged (no CRLF translation).

use openssl::error::ErrorStack;
use openssl::pkcs7::{Pkcs7, Pkcs7Flags};
use openssl::pkey::{PKeyRef, Private};
use openssl::stack::Stack;
use openssl::symm::Cipher;
use openssl::x509::{X509Ref, X509};

/// Header every S/MIME message starts with.
const MIME_HEADER: &[u8] = b"MIME-Version:";

/// Encrypt plaintext for a single recipient certificate.
pub fn seal(recipient: &X509Ref, plaintext: &[u8], cipher: Cipher) -> Result<Vec<u8>, ErrorStack> {
    let mut recipients: Stack<X509> = Stack::new()?;
    recipients.push(recipient.to_owned())?;

    let pkcs7 = Pkcs7::encrypt(&recipients, plaintext, cipher, Pkcs7Flags::BINARY)?;
    pkcs7.to_smime(&[], Pkcs7Flags::BINARY)
}

/// Decrypt an S/MIME message with the recipient's key and certificate.
pub fn open(
    message: &[u8],
    key: &PKeyRef<Private>,
    recipient: &X509Ref,
) -> Result<Vec<u8>, ErrorStack> {
    let (pkcs7, _) = Pkcs7::from_smime(message)?;
    pkcs7.decrypt(key, recipient, Pkcs7Flags::BINARY)
}

/// Check if these bytes look like an S/MIME message.
///
/// This is a heuristic on the header, not a guarantee.
pub fn is_smime(bytes: &[u8]) -> bool {
    bytes.starts_with(MIME_HEADER)
}
