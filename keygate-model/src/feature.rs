//! Named capability toggles bundled inside a license.

use crate::error::LicenseFormatError;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Expiry sentinel meaning the feature never expires.
pub const NEVER_EXPIRES: i64 = -1;

/// ASCII unit separator between a feature name and its expiry on the wire.
pub const FEATURE_SEPARATOR: char = '\u{1F}';

/// A named, optionally time-limited capability inside a license.
///
/// Two features are equal iff their names match; the expiry is deliberately
/// not part of identity. License-level equality compares expiries separately.
#[derive(Debug, Clone, Eq)]
pub struct Feature {
    name: String,
    good_before_date: i64,
}

impl Feature {
    /// Creates a feature expiring at `good_before_date` (epoch milliseconds).
    pub fn new(name: impl Into<String>, good_before_date: i64) -> Self {
        Self {
            name: name.into(),
            good_before_date,
        }
    }

    /// Creates a feature that never expires.
    pub fn never_expiring(name: impl Into<String>) -> Self {
        Self::new(name, NEVER_EXPIRES)
    }

    /// Returns the feature name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the expiry in epoch milliseconds, or [`NEVER_EXPIRES`].
    #[must_use]
    pub fn good_before_date(&self) -> i64 {
        self.good_before_date
    }

    /// Returns true if the feature never expires.
    #[must_use]
    pub fn never_expires(&self) -> bool {
        self.good_before_date == NEVER_EXPIRES
    }

    /// Returns true if the feature is still valid at `at_millis`.
    #[must_use]
    pub fn is_valid_at(&self, at_millis: i64) -> bool {
        self.never_expires() || self.good_before_date >= at_millis
    }

    /// Parses a wire token of the form `name\u{1F}expiry`.
    pub(crate) fn parse(token: &str) -> Result<Self, LicenseFormatError> {
        let (name, expiry) = token
            .split_once(FEATURE_SEPARATOR)
            .ok_or_else(|| LicenseFormatError::MalformedFeature(token.to_string()))?;
        let good_before_date: i64 = expiry
            .parse()
            .map_err(|_| LicenseFormatError::MalformedFeature(token.to_string()))?;
        Ok(Self::new(name, good_before_date))
    }
}

impl PartialEq for Feature {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Hash for Feature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, FEATURE_SEPARATOR, self.good_before_date)
    }
}
