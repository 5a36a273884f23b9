//! License data model and wire serialization for Keygate.
//!
//! This crate holds the value types shared by the issuing and verifying
//! sides:
//! - [`License`]: immutable license object built via [`LicenseBuilder`]
//! - [`Feature`]: named, optionally time-limited capability toggle
//! - [`SignedLicense`]: encrypted license bytes plus their signature
//!
//! # Wire Format
//!
//! A license renders as a bracketed, `][`-delimited string:
//!
//! ```text
//! [productKey][holder][issuer][subject][issueDate][goodAfterDate][goodBeforeDate][numberOfLicenses][[feat1, feat2]]
//! ```
//!
//! Each feature is `name` + ASCII 0x1F + `expiry`. This rendering is the
//! bit-exact compatibility contract with previously issued licenses, so the
//! serializer performs no escaping; see [`License::deserialize`] for the
//! consequences.

mod error;
mod feature;
mod license;
mod signed;

pub use error::{LicenseFormatError, ModelResult};
pub use feature::{Feature, FEATURE_SEPARATOR, NEVER_EXPIRES};
pub use license::{License, LicenseBuilder, UNLIMITED_LICENSES};
pub use signed::SignedLicense;
