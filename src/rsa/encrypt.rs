// RSA Block Encryption
// Zero-pads plaintext and encrypts it one block at a time

use log::debug;

use super::bigint::mod_pow;
use super::codec::{bytes_to_int, int_to_bytes};
use super::keygen::Keypair;
use super::padding::pad_zero;
use crate::error::{Result, RsaError};

/// Encrypt `plaintext` with the public half of `keypair`
///
/// The plaintext is zero padded to a multiple of `block_size`. Each
/// `block_size` chunk is read as a big-endian integer `a`, and
/// `a^e mod n` is written out as exactly `key_length` bytes, so the
/// ciphertext is `key_length / block_size` times longer than the padded input.
/// Every chunk must be smaller than `n`.
pub fn encrypt(plaintext: &[u8], keypair: &Keypair, block_size: usize) -> Result<Vec<u8>> {
    if keypair.key_length() == 0 {
        return Err(RsaError::MissingModulus);
    }

    let padded = pad_zero(plaintext, block_size)?;
    let blocks = padded.len() / block_size;
    let mut ciphertext = Vec::with_capacity(blocks * keypair.key_length());

    for (idx, chunk) in padded.chunks(block_size).enumerate() {
        let a = bytes_to_int(chunk);
        if &a >= keypair.n() {
            return Err(RsaError::ValueOutOfRange { block: idx });
        }

        let b = mod_pow(&a, keypair.e(), keypair.n());
        ciphertext.extend_from_slice(&int_to_bytes(&b, keypair.key_length()));
    }

    debug!(
        "encrypted {} bytes into {blocks} block(s) of {} bytes",
        plaintext.len(),
        keypair.key_length()
    );
    Ok(ciphertext)
}

/// Encrypt a string using RSA public key
pub fn encrypt_string(plaintext: &str, keypair: &Keypair, block_size: usize) -> Result<Vec<u8>> {
    encrypt(plaintext.as_bytes(), keypair, block_size)
}
