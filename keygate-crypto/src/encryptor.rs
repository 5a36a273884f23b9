//! Abstract encryption interface consumed by the license manager.
//!
//! The manager depends on `Arc<dyn LicenseEncryptor>` and never sees raw
//! key material. [`PasswordEncryptor`] is the production implementation;
//! tests may substitute their own to observe or bypass the pipeline.

use crate::cipher::{decrypt_with_password, encrypt_with_password, KdfParams};
use crate::error::CryptoResult;
use crate::secret::Password;
use zeroize::Zeroizing;

/// Trait for encrypting and decrypting opaque byte slices under a password.
///
/// Implementations own the key-derivation policy. Decrypted plaintext is
/// returned zeroizing so it cannot linger after use.
pub trait LicenseEncryptor: Send + Sync {
    /// Encrypts `plaintext` under `password`, returning an opaque blob.
    fn encrypt(&self, password: &Password, plaintext: &[u8]) -> CryptoResult<Vec<u8>>;

    /// Decrypts a blob previously produced by `encrypt`.
    fn decrypt(&self, password: &Password, blob: &[u8]) -> CryptoResult<Zeroizing<Vec<u8>>>;
}

/// Password-based encryptor using Argon2id and ChaCha20-Poly1305.
#[derive(Clone, Debug, Default)]
pub struct PasswordEncryptor {
    params: KdfParams,
}

impl PasswordEncryptor {
    /// Creates an encryptor with explicit key-derivation parameters.
    #[must_use]
    pub fn new(params: KdfParams) -> Self {
        Self { params }
    }
}

impl LicenseEncryptor for PasswordEncryptor {
    fn encrypt(&self, password: &Password, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        encrypt_with_password(password, plaintext, &self.params)
    }

    fn decrypt(&self, password: &Password, blob: &[u8]) -> CryptoResult<Zeroizing<Vec<u8>>> {
        decrypt_with_password(password, blob, &self.params)
    }
}
