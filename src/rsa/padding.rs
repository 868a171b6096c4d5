// Zero Padding
// Right-pads plaintext to a whole number of blocks

use crate::error::{Result, RsaError};

/// Right-pad `data` with zero bytes to a multiple of `block_size`.
/// Empty input stays empty.
pub fn pad_zero(data: &[u8], block_size: usize) -> Result<Vec<u8>> {
    if block_size == 0 {
        return Err(RsaError::ZeroBlockSize);
    }

    let padded_len = data.len().div_ceil(block_size) * block_size;
    let mut result = Vec::with_capacity(padded_len);
    result.extend_from_slice(data);
    result.resize(padded_len, 0);
    Ok(result)
}

/// Drop trailing zero bytes. Only safe when the original data is known
/// not to end in zeros; decryption never does this on its own.
pub fn strip_trailing_zeros(data: &[u8]) -> &[u8] {
    let end = data.iter().rposition(|&b| b != 0).map_or(0, |pos| pos + 1);
    &data[..end]
}
