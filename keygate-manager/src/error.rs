//! Error types for the license manager.

use keygate_crypto::CryptoError;
use keygate_model::LicenseFormatError;
use thiserror::Error;

/// Errors surfaced by the license manager and its collaborators.
///
/// Nothing here is retried internally: crypto failures are deterministic,
/// and the validation variants are business-rule rejections rather than
/// bugs. Callers decide what, if anything, to retry at the provider layer.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// A required provider was missing at construction time.
    #[error("license manager misconfigured: {0}")]
    Configuration(String),

    /// The lookup context was empty or blank.
    #[error("license context must not be empty")]
    InvalidContext,

    /// A collaborator (license, key-data, or password provider) failed.
    #[error("provider failure: {0}")]
    Provider(String),

    /// Signature, key, or decryption failure.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// The decrypted license bytes could not be parsed.
    #[error(transparent)]
    Format(#[from] LicenseFormatError),

    /// The license's validity window has ended.
    #[error("license for {subject:?} held by {holder:?} expired on {date}")]
    Expired {
        /// Licensed subject.
        subject: String,
        /// License holder.
        holder: String,
        /// Human-readable end of the validity window.
        date: String,
    },

    /// The license's validity window has not started yet.
    #[error("license for {subject:?} held by {holder:?} is not valid until {date}")]
    NotYetValid {
        /// Licensed subject.
        subject: String,
        /// License holder.
        holder: String,
        /// Human-readable start of the validity window.
        date: String,
    },
}

impl LicenseError {
    /// Returns true for the business-rule rejections ([`Self::Expired`] and
    /// [`Self::NotYetValid`]), letting callers catch them broadly.
    #[must_use]
    pub fn is_invalid_license(&self) -> bool {
        matches!(self, Self::Expired { .. } | Self::NotYetValid { .. })
    }
}

/// Result type for manager operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
