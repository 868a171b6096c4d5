//! Teaching-grade RSA over arbitrary-precision integers.
//!
//! The engine lives in [`rsa`]: a Miller-Rabin primality oracle, an
//! extended-Euclid solver, keypair generation, a block-wise cipher and a
//! textual key store. There is no padding scheme; blocks are zero padded
//! and encrypted with raw modular exponentiation.

pub mod config;
pub mod error;
pub mod rsa;
pub mod util;

pub use config::EngineConfig;
pub use error::{Result, RsaError};
pub use rsa::{
    decrypt, decrypt_blocks, encrypt, export_key, generate_keypair, generate_keypair_with,
    import_key, CancelToken, KeyRecord, Keypair, PrivateField,
};
