// RSA Key Generation
// Draws two distinct primes and derives the private exponent

use log::{debug, warn};
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};

use super::bigint::{from_u64, mod_inverse, mod_pow, RsaBigInt};
use super::cancel::CancelToken;
use super::codec::byte_length;
use super::prime::random_prime_with;
use crate::config::EngineConfig;
use crate::error::{Result, RsaError};

/// Fixed public exponent
pub const PUBLIC_EXPONENT: u64 = 65537;

/// Smallest modulus we generate; each prime gets at least 8 bits
pub const MIN_KEY_BITS: u32 = 16;

/// RSA keypair
///
/// The primes are dropped once `d` is derived. `d` is `None` for a
/// public-only key, e.g. one imported from a public record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypair {
    n: RsaBigInt,
    e: RsaBigInt,
    d: Option<RsaBigInt>,
    key_length: usize,
}

impl Default for Keypair {
    fn default() -> Self {
        Self {
            n: RsaBigInt::zero(),
            e: from_u64(PUBLIC_EXPONENT),
            d: None,
            key_length: 0,
        }
    }
}

impl Keypair {
    /// Build a keypair from raw parts; `n` must be non-zero.
    /// Does not check that `e` and `d` match `n`.
    pub fn new(n: RsaBigInt, e: RsaBigInt, d: Option<RsaBigInt>) -> Result<Self> {
        if n.is_zero() {
            return Err(RsaError::MissingModulus);
        }
        let key_length = byte_length(&n);
        Ok(Self { n, e, d, key_length })
    }

    /// Modulus
    pub fn n(&self) -> &RsaBigInt {
        &self.n
    }

    /// Public exponent
    pub fn e(&self) -> &RsaBigInt {
        &self.e
    }

    /// Private exponent, if this key carries one
    pub fn d(&self) -> Option<&RsaBigInt> {
        self.d.as_ref()
    }

    /// Smallest number of bytes that can hold `n`
    pub fn key_length(&self) -> usize {
        self.key_length
    }

    pub fn is_private(&self) -> bool {
        self.d.is_some()
    }

    /// Copy of this key without the private exponent
    pub fn public(&self) -> Self {
        Self {
            d: None,
            ..self.clone()
        }
    }

    /// m^e mod n, for m < n
    pub fn encrypt_int(&self, m: &RsaBigInt) -> Result<RsaBigInt> {
        if m >= &self.n {
            return Err(RsaError::ValueOutOfRange { block: 0 });
        }
        Ok(mod_pow(m, &self.e, &self.n))
    }

    /// c^d mod n, for c < n
    pub fn decrypt_int(&self, c: &RsaBigInt) -> Result<RsaBigInt> {
        let d = self.d.as_ref().ok_or(RsaError::MissingPrivateExponent)?;
        if c >= &self.n {
            return Err(RsaError::ValueOutOfRange { block: 0 });
        }
        Ok(mod_pow(c, d, &self.n))
    }

    pub(crate) fn set_n(&mut self, n: RsaBigInt) {
        self.key_length = byte_length(&n);
        self.n = n;
    }

    pub(crate) fn set_e(&mut self, e: RsaBigInt) {
        self.e = e;
    }

    pub(crate) fn set_d(&mut self, d: RsaBigInt) {
        self.d = Some(d);
    }
}

/// Generate an RSA keypair whose modulus has about `bit_length` bits,
/// using a fresh OS random source and default search limits
pub fn generate_keypair(bit_length: u32) -> Result<Keypair> {
    let config = EngineConfig::default().with_key_bits(bit_length);
    generate_keypair_with(&config, &mut OsRng, &CancelToken::new())
}

/// Generate an RSA keypair of `config.key_bits` bits
///
/// Each prime gets half the bits, drawn from [2^(b-1), 2^b - 1]. When
/// the primes collide, or when `e` is not invertible modulo
/// (p-1)(q-1), both primes are discarded and redrawn, at most
/// `config.max_key_attempts` times.
pub fn generate_keypair_with<R>(
    config: &EngineConfig,
    rng: &mut R,
    cancel: &CancelToken,
) -> Result<Keypair>
where
    R: Rng + CryptoRng + ?Sized,
{
    let bit_length = config.key_bits;
    if bit_length < MIN_KEY_BITS {
        return Err(RsaError::InvalidBitLength(bit_length));
    }
    if config.rounds == 0 {
        return Err(RsaError::ZeroRounds);
    }

    let half_bits = bit_length / 2;
    let lower = RsaBigInt::one() << (half_bits - 1);
    let upper = (RsaBigInt::one() << half_bits) - 1u8;
    let e = from_u64(PUBLIC_EXPONENT);

    for attempt in 1..=config.max_key_attempts {
        let p = random_prime_with(&lower, &upper, config.rounds, rng, cancel)?;
        let q = random_prime_with(&lower, &upper, config.rounds, rng, cancel)?;
        if p == q {
            debug!("keygen attempt {attempt}: p == q, redrawing");
            continue;
        }

        let lambda = (&p - 1u8) * (&q - 1u8);
        let d = match mod_inverse(&e, &lambda) {
            Ok(d) => d,
            Err(RsaError::NoInverse) => {
                debug!("keygen attempt {attempt}: e divides (p-1)(q-1), redrawing");
                continue;
            }
            Err(err) => return Err(err),
        };

        let keypair = Keypair::new(p * q, e.clone(), Some(d))?;
        debug!(
            "generated {}-bit modulus ({} bytes) after {attempt} attempt(s)",
            keypair.n.bits(),
            keypair.key_length
        );
        return Ok(keypair);
    }

    warn!("keygen gave up after {} attempts", config.max_key_attempts);
    Err(RsaError::KeygenExhausted {
        attempts: config.max_key_attempts,
    })
}
