//! End-to-end scenarios over the public API

use num_bigint::BigInt;
use rsa_edu::rsa::{decrypt, encrypt, export_key, extended_gcd, generate_keypair, import_key};
use rsa_edu::{KeyRecord, Keypair, RsaError};

#[test]
fn hello_world_512() {
    let keypair = generate_keypair(512).unwrap();
    let message = b"hello world";

    let ciphertext = encrypt(message, &keypair, 16).unwrap();
    assert_eq!(ciphertext.len(), keypair.key_length());

    let plaintext = decrypt(&ciphertext, &keypair).unwrap();
    assert_eq!(plaintext.len(), 16);
    assert_eq!(&plaintext[..11], message);
    assert!(plaintext[11..].iter().all(|&b| b == 0));
}

#[test]
fn extended_gcd_240_46() {
    let (g, x, y) = extended_gcd(&BigInt::from(240), &BigInt::from(46));
    assert_eq!(g, BigInt::from(2));
    assert_eq!(x, BigInt::from(-9));
    assert_eq!(y, BigInt::from(47));
    assert_eq!(BigInt::from(240) * x + BigInt::from(46) * y, g);
}

#[test]
fn key_record_text_roundtrip() {
    let keypair = generate_keypair(512).unwrap();

    let text = export_key(&keypair, true).to_json().unwrap();
    let restored = import_key(&KeyRecord::from_json(&text).unwrap()).unwrap();
    assert_eq!(restored, keypair);

    let text = export_key(&keypair, false).to_json().unwrap();
    let mut public = Keypair::default();
    public.import(&KeyRecord::from_json(&text).unwrap()).unwrap();
    assert_eq!(public.n(), keypair.n());
    assert_eq!(public.e(), keypair.e());
    assert!(public.d().is_none());
}

#[test]
fn public_record_encrypts_private_record_decrypts() {
    let keypair = generate_keypair(512).unwrap();
    let public = import_key(&export_key(&keypair, false)).unwrap();
    let private = import_key(&export_key(&keypair, true)).unwrap();

    let message = b"The quick brown fox jumps over the lazy dog";
    let ciphertext = encrypt(message, &public, 16).unwrap();
    assert_eq!(ciphertext.len(), 3 * keypair.key_length());

    assert!(matches!(
        decrypt(&ciphertext, &public),
        Err(RsaError::MissingPrivateExponent)
    ));

    let plaintext = decrypt(&ciphertext, &private).unwrap();
    assert_eq!(&plaintext[..message.len()], message);
    assert!(plaintext[message.len()..].iter().all(|&b| b == 0));
}

#[test]
fn truncated_ciphertext_is_rejected() {
    let keypair = generate_keypair(512).unwrap();
    let ciphertext = encrypt(b"hello world", &keypair, 16).unwrap();

    assert!(matches!(
        decrypt(&ciphertext[..ciphertext.len() - 1], &keypair),
        Err(RsaError::InvalidBlockSize { .. })
    ));
}
