// RSA Big Integer Operations
// Extended Euclid, modular inverse and modular exponentiation over num-bigint

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Result, RsaError};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Modular exponentiation: base^exp mod modulus
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus.is_one() {
        return RsaBigInt::zero();
    }
    base.modpow(exp, modulus)
}

/// Extended Euclidean Algorithm
/// Returns (g, x, y) such that a*x + b*y = g = gcd(a, b)
///
/// Reduces on `a`: the base case is `a == 0`, which yields `(b, 0, 1)`.
/// Division and remainder are floored, so negative inputs behave like
/// their mathematical counterparts.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    if a.is_zero() {
        return (b.clone(), BigInt::zero(), BigInt::one());
    }

    let (g, y, x) = extended_gcd(&b.mod_floor(a), a);
    let x = x - b.div_floor(a) * &y;

    (g, x, y)
}

/// Compute modular inverse: a^(-1) mod m
/// Fails with `RsaError::NoInverse` when gcd(a, m) != 1
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> Result<RsaBigInt> {
    let a = BigInt::from_biguint(Sign::Plus, a.clone());
    let m = BigInt::from_biguint(Sign::Plus, m.clone());

    let (g, x, _) = extended_gcd(&a, &m);
    if !g.is_one() {
        return Err(RsaError::NoInverse);
    }

    // mod_floor keeps the result in [0, m)
    x.mod_floor(&m).to_biguint().ok_or(RsaError::NoInverse)
}
