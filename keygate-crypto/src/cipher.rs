//! Password-based symmetric encryption.
//!
//! Keys are derived from passwords with Argon2id and used with
//! ChaCha20-Poly1305 AEAD. The encrypted blob layout is
//! `salt(16) || nonce(12) || ciphertext+tag`, so a blob is self-contained:
//! decryption needs only the blob and the password.

use crate::error::{CryptoError, CryptoResult};
use crate::secret::Password;
use argon2::{Argon2, Params, Version};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Size of encryption keys in bytes (256 bits for ChaCha20).
pub const KEY_SIZE: usize = 32;

/// Size of the key-derivation salt in bytes.
pub const SALT_SIZE: usize = 16;

/// Size of the AEAD nonce in bytes (96 bits for ChaCha20-Poly1305).
pub const NONCE_SIZE: usize = 12;

/// Size of the authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// A derived encryption key with automatic zeroization on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Creates a derived key from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Salt for key derivation.
#[derive(Clone, Debug)]
pub struct Salt {
    bytes: [u8; SALT_SIZE],
}

impl Salt {
    /// Generates a random salt.
    #[must_use]
    pub fn random() -> Self {
        let mut bytes = [0u8; SALT_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Creates a salt from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; SALT_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the salt bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; SALT_SIZE] {
        &self.bytes
    }
}

/// Key derivation parameters.
#[derive(Clone, Debug)]
pub struct KdfParams {
    /// Memory cost in KiB.
    pub memory_cost: u32,
    /// Time cost (iterations).
    pub time_cost: u32,
    /// Parallelism factor.
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        // OWASP recommendations for Argon2id (2023)
        Self {
            memory_cost: 19 * 1024, // 19 MiB
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl KdfParams {
    /// Creates parameters for testing (fast but insecure).
    #[must_use]
    pub fn fast_insecure() -> Self {
        Self {
            memory_cost: 1024, // 1 MiB
            time_cost: 1,
            parallelism: 1,
        }
    }
}

/// Derives an encryption key from a password using Argon2id.
pub fn derive_key(password: &Password, salt: &Salt, params: &KdfParams) -> CryptoResult<DerivedKey> {
    let argon2_params = Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        Some(KEY_SIZE),
    )
    .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, argon2_params);

    let mut key_bytes = [0u8; KEY_SIZE];
    argon2
        .hash_password_into(password.as_bytes(), salt.as_bytes(), &mut key_bytes)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

    Ok(DerivedKey::from_bytes(key_bytes))
}

/// Encrypts `plaintext` with a key derived from `password` under a fresh
/// random salt and nonce, returning a self-contained blob.
pub fn encrypt_with_password(
    password: &Password,
    plaintext: &[u8],
    params: &KdfParams,
) -> CryptoResult<Vec<u8>> {
    let salt = Salt::random();
    let key = derive_key(password, &salt, params)?;
    let cipher = ChaCha20Poly1305::new(key.as_bytes().into());

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;

    let mut blob = Vec::with_capacity(SALT_SIZE + NONCE_SIZE + ciphertext.len());
    blob.extend_from_slice(salt.as_bytes());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Decrypts a blob produced by [`encrypt_with_password`].
///
/// The returned plaintext is zeroized when dropped.
///
/// # Errors
///
/// Returns [`CryptoError::Decryption`] if the blob is truncated, the
/// password is wrong, or the ciphertext has been tampered with. No partial
/// plaintext is ever returned.
pub fn decrypt_with_password(
    password: &Password,
    blob: &[u8],
    params: &KdfParams,
) -> CryptoResult<Zeroizing<Vec<u8>>> {
    if blob.len() < SALT_SIZE + NONCE_SIZE + TAG_SIZE {
        return Err(CryptoError::Decryption("data too short".to_string()));
    }

    let mut salt_bytes = [0u8; SALT_SIZE];
    salt_bytes.copy_from_slice(&blob[..SALT_SIZE]);
    let salt = Salt::from_bytes(salt_bytes);

    let nonce = Nonce::from_slice(&blob[SALT_SIZE..SALT_SIZE + NONCE_SIZE]);
    let ciphertext = &blob[SALT_SIZE + NONCE_SIZE..];

    let key = derive_key(password, &salt, params)?;
    let cipher = ChaCha20Poly1305::new(key.as_bytes().into());

    cipher
        .decrypt(nonce, ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| {
            CryptoError::Decryption("wrong password or tampered data".to_string())
        })
}
