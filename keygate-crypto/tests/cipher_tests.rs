use keygate_crypto::{
    decrypt_with_password, derive_key, encrypt_with_password, CryptoError, KdfParams, Password,
    Salt, KEY_SIZE, NONCE_SIZE, SALT_SIZE, TAG_SIZE,
};

fn params() -> KdfParams {
    KdfParams::fast_insecure()
}

#[test]
fn encrypt_decrypt_roundtrip() {
    let password = Password::from("correct horse battery staple");
    let encrypted = encrypt_with_password(&password, b"Hello, World!", &params()).unwrap();
    let decrypted = decrypt_with_password(&password, &encrypted, &params()).unwrap();
    assert_eq!(&*decrypted, b"Hello, World!");
}

#[test]
fn encrypt_decrypt_empty() {
    let password = Password::from("pw");
    let encrypted = encrypt_with_password(&password, b"", &params()).unwrap();
    let decrypted = decrypt_with_password(&password, &encrypted, &params()).unwrap();
    assert!(decrypted.is_empty());
}

#[test]
fn blob_layout_is_salt_nonce_ciphertext() {
    let password = Password::from("pw");
    let encrypted = encrypt_with_password(&password, b"data", &params()).unwrap();
    assert_eq!(encrypted.len(), SALT_SIZE + NONCE_SIZE + 4 + TAG_SIZE);
}

#[test]
fn wrong_password_fails() {
    let encrypted = encrypt_with_password(&Password::from("right"), b"secret", &params()).unwrap();
    let err = decrypt_with_password(&Password::from("wrong"), &encrypted, &params()).unwrap_err();
    assert!(matches!(err, CryptoError::Decryption(_)));
}

#[test]
fn tampered_ciphertext_fails() {
    let password = Password::from("pw");
    let mut encrypted = encrypt_with_password(&password, b"secret", &params()).unwrap();
    let last = encrypted.len() - 1;
    encrypted[last] ^= 0xFF;
    assert!(decrypt_with_password(&password, &encrypted, &params()).is_err());
}

#[test]
fn truncated_blob_fails() {
    let password = Password::from("pw");
    let short = vec![0u8; SALT_SIZE + NONCE_SIZE + TAG_SIZE - 1];
    assert!(matches!(
        decrypt_with_password(&password, &short, &params()),
        Err(CryptoError::Decryption(_))
    ));
}

#[test]
fn same_plaintext_produces_different_blobs() {
    let password = Password::from("pw");
    let a = encrypt_with_password(&password, b"same", &params()).unwrap();
    let b = encrypt_with_password(&password, b"same", &params()).unwrap();
    // Fresh random salt and nonce every time.
    assert_ne!(a, b);
}

#[test]
fn derivation_is_deterministic() {
    let password = Password::from("pw");
    let salt = Salt::from_bytes([7u8; SALT_SIZE]);
    let a = derive_key(&password, &salt, &params()).unwrap();
    let b = derive_key(&password, &salt, &params()).unwrap();
    assert_eq!(a.as_bytes(), b.as_bytes());
    assert_eq!(a.as_bytes().len(), KEY_SIZE);
}

#[test]
fn different_salts_different_keys() {
    let password = Password::from("pw");
    let a = derive_key(&password, &Salt::from_bytes([1u8; SALT_SIZE]), &params()).unwrap();
    let b = derive_key(&password, &Salt::from_bytes([2u8; SALT_SIZE]), &params()).unwrap();
    assert_ne!(a.as_bytes(), b.as_bytes());
}
