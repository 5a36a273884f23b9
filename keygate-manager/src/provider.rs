//! Collaborator contracts consumed by the license manager.
//!
//! These seams are implemented externally — files, databases, network
//! stores, prompt loops — the manager only requires the synchronous
//! contracts below. Test doubles live with the tests.

use crate::error::LicenseResult;
use keygate_crypto::Password;
use keygate_model::SignedLicense;

/// Supplies the raw signed and encrypted license bytes for a context.
pub trait LicenseProvider: Send + Sync {
    /// Fetches the signed license for `context`.
    ///
    /// Returning `Ok(None)` means no license exists for the context; that
    /// is a normal outcome, not an error.
    fn license(&self, context: &str) -> LicenseResult<Option<SignedLicense>>;
}

/// Supplies the encrypted serialized public key used for verification.
pub trait KeyDataProvider: Send + Sync {
    /// Returns the encrypted key-data blob.
    fn encrypted_key_data(&self) -> LicenseResult<Vec<u8>>;
}

/// Supplies a password for decrypting key data or license content.
///
/// The returned [`Password`] zeroizes itself on drop, so the consuming side
/// never has to remember to wipe it.
pub trait PasswordProvider: Send + Sync {
    /// Returns the password.
    fn password(&self) -> LicenseResult<Password>;
}
