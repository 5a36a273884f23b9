//! License retrieval, verification, caching, and validation for Keygate.
//!
//! The [`LicenseManager`] is the orchestrator: callers ask it for the
//! license bound to a context (a customer or tenant identifier) and it
//! checks its cache, fetches signed+encrypted bytes from the configured
//! [`LicenseProvider`] on a miss, verifies the signature against the
//! decrypted public key, decrypts and deserializes the license, caches it
//! with a TTL, and answers feature and validity questions about it.
//!
//! # Design Principles
//!
//! - **No global state**: managers are plain instances built from an
//!   explicit [`LicenseManagerConfig`]; tests construct as many as they need
//! - **Verify before decrypt**: the signature covers the encrypted content,
//!   so tampering is detected without touching the plaintext
//! - **Secrets never linger**: passwords, decrypted key data, decrypted
//!   license text, and the signed license's buffers are zeroized on every
//!   exit path
//! - **No internal retries**: crypto failures are deterministic; the caller
//!   decides whether re-fetching from the provider layer makes sense

mod cache;
mod error;
mod issue;
mod manager;
mod provider;
mod requirement;
mod validator;

pub use error::{LicenseError, LicenseResult};
pub use issue::issue_license;
pub use manager::{LicenseManager, LicenseManagerConfig, DEFAULT_CACHE_TTL_MINUTES};
pub use provider::{KeyDataProvider, LicenseProvider, PasswordProvider};
pub use requirement::{FeatureRequirement, MatchMode};
pub use validator::{DateValidator, LicenseValidator};
