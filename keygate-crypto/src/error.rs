//! Error types for the cryptographic layer.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in cryptographic operations.
///
/// The four signature-verification failures are deliberately separate
/// variants: `AlgorithmNotSupported` and `InappropriateKey` point at
/// environment or configuration problems, while `CorruptSignature` and
/// `InvalidSignature` indicate tampering or corruption. None of them are
/// retryable — the outcome is deterministic for the same inputs.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The key data names a signature algorithm this build does not support.
    #[error("signature algorithm {0:?} is not supported")]
    AlgorithmNotSupported(String),

    /// Key material does not match the expected format or algorithm.
    #[error("inappropriate key material: {0}")]
    InappropriateKey(String),

    /// The signature bytes themselves are malformed.
    #[error("corrupt signature: {0}")]
    CorruptSignature(String),

    /// The signature is well-formed but does not match the signed content.
    #[error("signature does not match the signed content")]
    InvalidSignature,

    /// Key derivation failed.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// Encryption failed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Decryption failed (wrong password or tampered ciphertext).
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// Serialized key data is malformed.
    #[error("malformed key data: {0}")]
    KeyData(#[from] serde_json::Error),
}
