// RSA Block Decryption
// Decrypts ciphertext in key-length chunks with the private exponent

use log::debug;

use super::bigint::{mod_pow, RsaBigInt};
use super::codec::{bytes_to_int, int_to_bytes};
use super::keygen::Keypair;
use crate::error::{Result, RsaError};

/// Run `c^d mod n` over every `key_length` chunk of `ciphertext`,
/// handing each plaintext integer to `sink`
fn decrypt_each<F>(ciphertext: &[u8], keypair: &Keypair, mut sink: F) -> Result<()>
where
    F: FnMut(&RsaBigInt),
{
    let d = keypair.d().ok_or(RsaError::MissingPrivateExponent)?;
    let key_length = keypair.key_length();
    if key_length == 0 {
        return Err(RsaError::MissingModulus);
    }
    if ciphertext.len() % key_length != 0 {
        return Err(RsaError::InvalidBlockSize {
            expected: key_length,
            actual: ciphertext.len(),
        });
    }

    for (idx, chunk) in ciphertext.chunks(key_length).enumerate() {
        let c = bytes_to_int(chunk);
        if &c >= keypair.n() {
            return Err(RsaError::ValueOutOfRange { block: idx });
        }
        sink(&mod_pow(&c, d, keypair.n()));
    }

    debug!(
        "decrypted {} block(s) of {key_length} bytes",
        ciphertext.len() / key_length
    );
    Ok(())
}

/// Decrypt ciphertext produced by [`encrypt`](super::encrypt::encrypt)
///
/// Ciphertext is consumed in chunks of exactly `key_length` bytes, and
/// each decrypted block is re-encoded in its minimal big-endian form.
/// Zero padding added at encryption is kept, and a block whose leading
/// bytes were zero comes back shorter; use [`decrypt_blocks`] when the
/// block size is known.
pub fn decrypt(ciphertext: &[u8], keypair: &Keypair) -> Result<Vec<u8>> {
    let mut plaintext = Vec::with_capacity(ciphertext.len());
    decrypt_each(ciphertext, keypair, |a| {
        plaintext.extend_from_slice(&int_to_bytes(a, 0));
    })?;
    Ok(plaintext)
}

/// Decrypt and re-encode every block to exactly `block_size` bytes.
/// Inverts `encrypt(_, _, block_size)` for any input, up to the zero padding.
pub fn decrypt_blocks(ciphertext: &[u8], keypair: &Keypair, block_size: usize) -> Result<Vec<u8>> {
    if block_size == 0 {
        return Err(RsaError::ZeroBlockSize);
    }

    let mut plaintext = Vec::with_capacity(ciphertext.len());
    let mut oversized = None;
    decrypt_each(ciphertext, keypair, |a| {
        let bytes = int_to_bytes(a, block_size);
        if bytes.len() > block_size && oversized.is_none() {
            oversized = Some(bytes.len());
        }
        plaintext.extend_from_slice(&bytes);
    })?;

    // A block wider than block_size means the wrong block size or key
    if let Some(actual) = oversized {
        return Err(RsaError::InvalidBlockSize {
            expected: block_size,
            actual,
        });
    }
    Ok(plaintext)
}

/// Decrypt ciphertext to a string
pub fn decrypt_to_string(ciphertext: &[u8], keypair: &Keypair) -> Result<String> {
    let plaintext = decrypt(ciphertext, keypair)?;
    Ok(String::from_utf8(plaintext)?)
}
