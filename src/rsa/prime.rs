// Primality Oracle
// Miller-Rabin probabilistic test and random prime search

use log::trace;
use num_bigint::RandBigInt;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};

use super::bigint::RsaBigInt;
use super::cancel::CancelToken;
use crate::error::{Result, RsaError};

/// Default number of Miller-Rabin rounds, false positive rate <= 4^-10
pub const DEFAULT_ROUNDS: u32 = 10;

/// Every prime below 101
pub const SMALL_PRIMES: [u8; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Miller-Rabin primality test with a fresh OS random source
/// Returns true if n is probably prime
pub fn is_probable_prime(n: &RsaBigInt, rounds: u32) -> bool {
    is_probable_prime_with(n, rounds, &mut OsRng)
}

/// Miller-Rabin primality test drawing bases from `rng`
///
/// Inputs below 101 are answered exactly from [`SMALL_PRIMES`], and any
/// input with a small prime factor is rejected before the witness loop.
pub fn is_probable_prime_with<R>(n: &RsaBigInt, rounds: u32, rng: &mut R) -> bool
where
    R: Rng + CryptoRng + ?Sized,
{
    if let Some(small) = n.to_u8().filter(|v| *v < 101) {
        return SMALL_PRIMES.contains(&small);
    }
    if SMALL_PRIMES.iter().any(|p| (n % *p).is_zero()) {
        return false;
    }

    // Write n-1 as 2^s * d with d odd
    let n_minus_one = n - 1u8;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    let two = RsaBigInt::from(2u8);
    'witness: for _ in 0..rounds {
        // Random base a in [2, n-2]
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = a.modpow(&d, n);

        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
            if x.is_one() {
                break;
            }
        }

        trace!("miller-rabin: base {a:#x} witnesses that {n:#x} is composite");
        return false;
    }

    true
}

/// Uniform draw in [lower, upper], forced odd
fn draw_candidate<R>(lower: &RsaBigInt, upper: &RsaBigInt, rng: &mut R) -> RsaBigInt
where
    R: Rng + CryptoRng + ?Sized,
{
    let mut candidate = rng.gen_biguint_range(lower, &(upper + 1u8));
    if candidate.is_even() {
        candidate += 1u8;
    }
    candidate
}

/// Random probable prime in [lower, upper] with a fresh OS random source.
/// Loops until a candidate passes; `upper` should be odd so forcing a
/// candidate odd never leaves the range.
///
/// Panics if `lower > upper`.
pub fn random_prime(lower: &RsaBigInt, upper: &RsaBigInt) -> RsaBigInt {
    let mut rng = OsRng;
    loop {
        let candidate = draw_candidate(lower, upper, &mut rng);
        if is_probable_prime_with(&candidate, DEFAULT_ROUNDS, &mut rng) {
            return candidate;
        }
    }
}

/// Random probable prime in [lower, upper] drawing from `rng`,
/// checking `cancel` before each candidate. `rounds` must be non-zero.
pub fn random_prime_with<R>(
    lower: &RsaBigInt,
    upper: &RsaBigInt,
    rounds: u32,
    rng: &mut R,
    cancel: &CancelToken,
) -> Result<RsaBigInt>
where
    R: Rng + CryptoRng + ?Sized,
{
    if rounds == 0 {
        return Err(RsaError::ZeroRounds);
    }
    let mut draws = 0usize;
    loop {
        if cancel.is_cancelled() {
            return Err(RsaError::Cancelled);
        }
        draws += 1;

        let candidate = draw_candidate(lower, upper, rng);
        if is_probable_prime_with(&candidate, rounds, rng) {
            trace!("prime found after {draws} draws");
            return Ok(candidate);
        }
    }
}

/// Exact trial division over the 6k +/- 1 wheel.
/// Only practical for small inputs; used as a reference check.
pub fn is_prime_wheel(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    let mut i = 5u64;
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}
