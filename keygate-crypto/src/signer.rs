//! Signing and verification with algorithm-tagged key material.
//!
//! Key data carries the name of its signature algorithm, so the scheme is
//! derived from the key itself rather than hard-coded at the call site.
//! `ed25519` is the supported algorithm; key data naming anything else
//! surfaces [`CryptoError::AlgorithmNotSupported`].
//!
//! The serialized key-data form is a small JSON object with the algorithm
//! tag and base64-encoded raw key bytes. The key-data provider stores this
//! form encrypted; the manager decrypts it and parses it here.

use crate::error::{CryptoError, CryptoResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use ed25519_dalek::{
    Signature, Signer as _, SigningKey, Verifier as _, VerifyingKey,
    PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH,
};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Algorithm tag for Ed25519 keys.
pub const ED25519: &str = "ed25519";

/// Serialized key-data form: algorithm tag plus base64 key bytes.
#[derive(Serialize, Deserialize)]
struct KeyDataWire {
    alg: String,
    key: String,
}

/// Public key material tagged with its signature algorithm.
#[derive(Clone, Debug)]
pub struct PublicKeyData {
    algorithm: String,
    key: Vec<u8>,
}

impl PublicKeyData {
    /// Creates public key data from an algorithm tag and raw key bytes.
    #[must_use]
    pub fn new(algorithm: impl Into<String>, key: Vec<u8>) -> Self {
        Self {
            algorithm: algorithm.into(),
            key,
        }
    }

    /// Returns the algorithm tag.
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Serializes to the JSON key-data form.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyData`] if JSON encoding fails.
    pub fn to_bytes(&self) -> CryptoResult<Vec<u8>> {
        let wire = KeyDataWire {
            alg: self.algorithm.clone(),
            key: STANDARD.encode(&self.key),
        };
        Ok(serde_json::to_vec(&wire)?)
    }

    /// Parses the JSON key-data form.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyData`] for malformed JSON and
    /// [`CryptoError::InappropriateKey`] for undecodable key bytes.
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        let wire: KeyDataWire = serde_json::from_slice(bytes)?;
        let key = STANDARD
            .decode(&wire.key)
            .map_err(|e| CryptoError::InappropriateKey(format!("invalid key base64: {e}")))?;
        Ok(Self {
            algorithm: wire.alg,
            key,
        })
    }

    /// Builds the verifying key for this material's algorithm.
    fn verifying_key(&self) -> CryptoResult<VerifyingKey> {
        if self.algorithm != ED25519 {
            return Err(CryptoError::AlgorithmNotSupported(self.algorithm.clone()));
        }
        let bytes: [u8; PUBLIC_KEY_LENGTH] = self.key.as_slice().try_into().map_err(|_| {
            CryptoError::InappropriateKey(format!(
                "expected {PUBLIC_KEY_LENGTH} key bytes, got {}",
                self.key.len()
            ))
        })?;
        VerifyingKey::from_bytes(&bytes)
            .map_err(|e| CryptoError::InappropriateKey(format!("invalid public key: {e}")))
    }
}

/// Private key material tagged with its signature algorithm.
///
/// The key bytes are zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKeyData {
    algorithm: String,
    key: Vec<u8>,
}

impl PrivateKeyData {
    /// Creates private key data from an algorithm tag and raw key bytes.
    #[must_use]
    pub fn new(algorithm: impl Into<String>, key: Vec<u8>) -> Self {
        Self {
            algorithm: algorithm.into(),
            key,
        }
    }

    /// Returns the algorithm tag.
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Serializes to the JSON key-data form.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyData`] if JSON encoding fails.
    pub fn to_bytes(&self) -> CryptoResult<Vec<u8>> {
        let wire = KeyDataWire {
            alg: self.algorithm.clone(),
            key: STANDARD.encode(&self.key),
        };
        Ok(serde_json::to_vec(&wire)?)
    }

    /// Parses the JSON key-data form.
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        let wire: KeyDataWire = serde_json::from_slice(bytes)?;
        let key = STANDARD
            .decode(&wire.key)
            .map_err(|e| CryptoError::InappropriateKey(format!("invalid key base64: {e}")))?;
        Ok(Self {
            algorithm: wire.alg,
            key,
        })
    }

    /// Builds the signing key for this material's algorithm.
    fn signing_key(&self) -> CryptoResult<SigningKey> {
        if self.algorithm != ED25519 {
            return Err(CryptoError::AlgorithmNotSupported(self.algorithm.clone()));
        }
        let bytes: [u8; SECRET_KEY_LENGTH] = self.key.as_slice().try_into().map_err(|_| {
            CryptoError::InappropriateKey(format!(
                "expected {SECRET_KEY_LENGTH} key bytes, got {}",
                self.key.len()
            ))
        })?;
        Ok(SigningKey::from_bytes(&bytes))
    }
}

impl std::fmt::Debug for PrivateKeyData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKeyData")
            .field("algorithm", &self.algorithm)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// A key pair for signing and verification.
pub struct KeyPair {
    /// The private half, for the issuing side.
    pub private: PrivateKeyData,
    /// The public half, stored (encrypted) by the key-data provider.
    pub public: PublicKeyData,
}

impl KeyPair {
    /// Generates a new random Ed25519 key pair.
    #[must_use]
    pub fn generate() -> Self {
        let signing = SigningKey::generate(&mut OsRng);
        let verifying = signing.verifying_key();
        Self {
            private: PrivateKeyData::new(ED25519, signing.to_bytes().to_vec()),
            public: PublicKeyData::new(ED25519, verifying.to_bytes().to_vec()),
        }
    }
}

/// Signs `data` with the given private key.
///
/// # Errors
///
/// Returns [`CryptoError::AlgorithmNotSupported`] for an unknown algorithm
/// tag and [`CryptoError::InappropriateKey`] for unusable key bytes.
pub fn sign(key: &PrivateKeyData, data: &[u8]) -> CryptoResult<Vec<u8>> {
    let signing_key = key.signing_key()?;
    Ok(signing_key.sign(data).to_bytes().to_vec())
}

/// Verifies `signature` over `data` with the given public key.
///
/// # Errors
///
/// The four failure modes stay distinct:
/// - [`CryptoError::AlgorithmNotSupported`]: unknown algorithm tag
/// - [`CryptoError::InappropriateKey`]: unusable key bytes
/// - [`CryptoError::CorruptSignature`]: malformed signature bytes
/// - [`CryptoError::InvalidSignature`]: verification ran and did not match
pub fn verify(key: &PublicKeyData, data: &[u8], signature: &[u8]) -> CryptoResult<()> {
    let verifying_key = key.verifying_key()?;

    if signature.len() != SIGNATURE_LENGTH {
        return Err(CryptoError::CorruptSignature(format!(
            "expected {SIGNATURE_LENGTH} signature bytes, got {}",
            signature.len()
        )));
    }
    let signature = Signature::from_slice(signature)
        .map_err(|e| CryptoError::CorruptSignature(e.to_string()))?;

    verifying_key
        .verify(data, &signature)
        .map_err(|_| CryptoError::InvalidSignature)
}
