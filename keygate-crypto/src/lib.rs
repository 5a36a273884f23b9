//! Signing, verification, and password-based encryption for Keygate.
//!
//! This crate covers the two cryptographic legs of the license pipeline:
//!
//! - **Signatures** ([`signer`]): Ed25519 signing and verification with
//!   algorithm-tagged key material. The signature scheme is derived from the
//!   key data itself, and the four verification failure modes (unsupported
//!   algorithm, inappropriate key, corrupt signature bytes, non-matching
//!   signature) stay distinguishable because callers react differently to
//!   environment misconfiguration vs. active tampering.
//! - **Symmetric encryption** ([`cipher`], [`encryptor`]): Argon2id-derived
//!   keys feeding ChaCha20-Poly1305, behind the [`LicenseEncryptor`] trait so
//!   the license manager never touches raw key material.
//!
//! # Secret Hygiene
//!
//! Passwords, derived keys, and decrypted plaintext are zeroized on every
//! exit path — [`Password`] and [`DerivedKey`] are `ZeroizeOnDrop`, and
//! decryption returns `Zeroizing<Vec<u8>>`.

mod cipher;
mod encryptor;
mod error;
mod secret;
mod signer;

pub use cipher::{
    decrypt_with_password, derive_key, encrypt_with_password, DerivedKey, KdfParams, Salt,
    KEY_SIZE, NONCE_SIZE, SALT_SIZE, TAG_SIZE,
};
pub use encryptor::{LicenseEncryptor, PasswordEncryptor};
pub use error::{CryptoError, CryptoResult};
pub use secret::Password;
pub use signer::{sign, verify, KeyPair, PrivateKeyData, PublicKeyData, ED25519};
