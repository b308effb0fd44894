//! OpenSSL multi-precision integer (MPI) encoding.
//!
//! This is the format written by OpenSSL's `BN_bn2mpi`:
//! - a 4-byte big-endian length of the body
//! - the body: the minimal big-endian magnitude, preceded by a `0x00` byte
//!   when the leading magnitude byte has its top bit set
//!
//! Zero is a bare zero length with no body. Key parameters are never
//! negative, so the sign bit is never set.
//!
//! Integers are passed as big-endian magnitude bytes. Leading zero bytes are
//! accepted and ignored, so DER integers (which carry their own sign padding)
//! and minimal encodings produce identical output.

use crate::error::{CoreError, Result};

/// Encode a non-negative integer to MPI bytes.
pub fn encode_mpi(magnitude: &[u8]) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(magnitude.len() + 5);
    write_mpi(&mut buf, magnitude)?;
    Ok(buf)
}

/// Append the MPI encoding of a non-negative integer to `buf`.
pub fn write_mpi(buf: &mut Vec<u8>, magnitude: &[u8]) -> Result<()> {
    let digits = strip_leading_zeros(magnitude);
    let pad = needs_sign_byte(digits);

    let body_len = digits.len() + usize::from(pad);
    let length =
        u32::try_from(body_len).map_err(|_| CoreError::IntegerTooLarge(digits.len()))?;

    buf.extend_from_slice(&length.to_be_bytes());
    if pad {
        buf.push(0x00);
    }
    buf.extend_from_slice(digits);
    Ok(())
}

/// Number of bits needed to represent the integer (0 for zero).
pub fn bit_length(magnitude: &[u8]) -> usize {
    let digits = strip_leading_zeros(magnitude);
    match digits.first() {
        None => 0,
        Some(&lead) => digits.len() * 8 - lead.leading_zeros() as usize,
    }
}

fn strip_leading_zeros(magnitude: &[u8]) -> &[u8] {
    let start = magnitude
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(magnitude.len());
    &magnitude[start..]
}

/// A full leading byte would read as negative without the pad.
fn needs_sign_byte(digits: &[u8]) -> bool {
    digits.first().is_some_and(|&lead| lead & 0x80 != 0)
}
