// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod cancel;
pub mod codec;
pub mod decrypt;
pub mod encrypt;
pub mod keygen;
pub mod keystore;
pub mod padding;
pub mod prime;

pub use bigint::{extended_gcd, mod_inverse, RsaBigInt};
pub use cancel::CancelToken;
pub use codec::{base64_to_int, bytes_to_int, int_to_base64, int_to_bytes};
pub use decrypt::{decrypt, decrypt_blocks, decrypt_to_string};
pub use encrypt::{encrypt, encrypt_string};
pub use keygen::{generate_keypair, generate_keypair_with, Keypair, PUBLIC_EXPONENT};
pub use keystore::{export_key, import_key, KeyRecord, PrivateField};
pub use prime::{is_probable_prime, is_probable_prime_with, random_prime, random_prime_with};
