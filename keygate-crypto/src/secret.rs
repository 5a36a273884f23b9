//! Scoped secret types.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A password with automatic zeroization on drop.
///
/// Password providers hand these out; the bytes are wiped on every exit
/// path, normal or exceptional, without relying on caller discipline.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password {
    bytes: Vec<u8>,
}

impl Password {
    /// Creates a password from raw bytes.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns the password bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes().to_vec())
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
