// RSA Engine Errors
// Every failure the engine reports to its caller

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RsaError {
    /// gcd(a, m) != 1, so `a` has no inverse modulo `m`
    #[error("No modular inverse exists: gcd(a, m) != 1")]
    NoInverse,

    #[error("Invalid key bit length `{0}`: need at least {min} bits", min = crate::rsa::keygen::MIN_KEY_BITS)]
    InvalidBitLength(u32),

    #[error("Invalid block size: data length `{actual}` is not a multiple of `{expected}`")]
    InvalidBlockSize { expected: usize, actual: usize },

    #[error("Block size must be greater than zero")]
    ZeroBlockSize,

    /// Zero Miller-Rabin rounds would accept every odd composite
    #[error("Miller-Rabin needs at least one round")]
    ZeroRounds,

    /// A block interpreted as an integer is not below the modulus
    #[error("Value out of range: block #{block} is not less than the modulus")]
    ValueOutOfRange { block: usize },

    #[error("The keypair has no private exponent")]
    MissingPrivateExponent,

    #[error("Key record has no usable modulus `n`")]
    MissingModulus,

    #[error("Malformed key record: {0}")]
    MalformedRecord(String),

    #[error("Invalid base64 field: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid key record text: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Key generation cancelled")]
    Cancelled,

    #[error("Key generation gave up after {attempts} attempts")]
    KeygenExhausted { attempts: usize },
}

pub type Result<T> = std::result::Result<T, RsaError>;
