// Integer Codec
// Big-endian bytes <-> integers, and integers <-> base64 text

use base64::{engine::general_purpose::STANDARD, Engine as _};
use num_traits::Zero;

use super::bigint::RsaBigInt;
use crate::error::Result;

/// Big-endian interpretation, most significant byte first
pub fn bytes_to_int(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(bytes)
}

/// Big-endian encoding left-padded with zeros to `min_length`.
/// Zero encodes as an empty sequence before padding.
pub fn int_to_bytes(value: &RsaBigInt, min_length: usize) -> Vec<u8> {
    let bytes = if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    };

    if bytes.len() >= min_length {
        return bytes;
    }

    let mut result = vec![0u8; min_length];
    let start = min_length - bytes.len();
    result[start..].copy_from_slice(&bytes);
    result
}

/// Minimal big-endian bytes in standard base64
pub fn int_to_base64(value: &RsaBigInt) -> String {
    STANDARD.encode(int_to_bytes(value, 0))
}

pub fn base64_to_int(text: &str) -> Result<RsaBigInt> {
    let bytes = STANDARD.decode(text.trim())?;
    Ok(bytes_to_int(&bytes))
}

/// Smallest number of bytes that can hold `value`
pub fn byte_length(value: &RsaBigInt) -> usize {
    ((value.bits() + 7) / 8) as usize
}
