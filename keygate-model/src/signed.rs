//! Signed license transport object.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// An encrypted, serialized license together with its signature.
///
/// Both buffers are opaque to this type: the content is ciphertext produced
/// by the issuing side and the signature covers those ciphertext bytes.
/// Accessors return copies so callers can never mutate the internal buffers;
/// [`SignedLicense::erase`] overwrites both with zeros, and dropping the
/// value erases it as well.
///
/// A signed license is consumed exactly once by the license manager, which
/// erases it immediately after decrypting its content.
#[derive(Clone, Serialize, Deserialize)]
pub struct SignedLicense {
    content: Vec<u8>,
    signature: Vec<u8>,
}

impl SignedLicense {
    /// Creates a signed license from encrypted content and its signature.
    #[must_use]
    pub fn new(content: Vec<u8>, signature: Vec<u8>) -> Self {
        Self { content, signature }
    }

    /// Returns a copy of the encrypted license content.
    #[must_use]
    pub fn content(&self) -> Vec<u8> {
        self.content.clone()
    }

    /// Returns a copy of the signature bytes.
    #[must_use]
    pub fn signature(&self) -> Vec<u8> {
        self.signature.clone()
    }

    /// Overwrites both internal buffers with zero bytes and empties them.
    pub fn erase(&mut self) {
        self.content.zeroize();
        self.signature.zeroize();
    }

    /// Returns true once both buffers have been erased.
    #[must_use]
    pub fn is_erased(&self) -> bool {
        self.content.is_empty() && self.signature.is_empty()
    }
}

impl Drop for SignedLicense {
    fn drop(&mut self) {
        self.erase();
    }
}

impl std::fmt::Debug for SignedLicense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedLicense")
            .field("content_len", &self.content.len())
            .field("signature_len", &self.signature.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_return_copies() {
        let signed = SignedLicense::new(vec![1, 2, 3], vec![4, 5, 6]);
        let mut content = signed.content();
        content[0] = 99;
        assert_eq!(signed.content(), vec![1, 2, 3]);
    }

    #[test]
    fn erase_clears_both_buffers() {
        let mut signed = SignedLicense::new(vec![1, 2, 3], vec![4, 5, 6]);
        signed.erase();
        assert!(signed.is_erased());
        assert!(signed.content().is_empty());
        assert!(signed.signature().is_empty());
    }
}
