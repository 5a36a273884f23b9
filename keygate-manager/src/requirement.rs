//! Feature-set requirements resolved against a license.

use keygate_model::License;

/// How a multi-feature requirement combines its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Satisfied if any named feature is licensed.
    Any,
    /// Satisfied only if every named feature is licensed.
    All,
}

/// A declarative requirement translating a set of feature names into a
/// boolean decision against a license.
///
/// This is the policy half of feature gating: call sites declare what they
/// need, the manager resolves it against the caller's license.
#[derive(Debug, Clone)]
pub struct FeatureRequirement {
    features: Vec<String>,
    mode: MatchMode,
}

impl FeatureRequirement {
    /// Creates a requirement satisfied when any of `features` is licensed.
    #[must_use]
    pub fn any(features: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            features: features.into_iter().map(Into::into).collect(),
            mode: MatchMode::Any,
        }
    }

    /// Creates a requirement satisfied only when all of `features` are
    /// licensed.
    #[must_use]
    pub fn all(features: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            features: features.into_iter().map(Into::into).collect(),
            mode: MatchMode::All,
        }
    }

    /// Returns the required feature names.
    #[must_use]
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Returns the combination mode.
    #[must_use]
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Resolves the requirement against `license` at `at_millis`.
    ///
    /// An empty requirement is satisfied in either mode.
    #[must_use]
    pub fn is_satisfied_by(&self, license: &License, at_millis: i64) -> bool {
        let names: Vec<&str> = self.features.iter().map(String::as_str).collect();
        match self.mode {
            MatchMode::Any => {
                names.is_empty() || license.has_license_for_any_feature(&names, at_millis)
            }
            MatchMode::All => license.has_license_for_all_features(&names, at_millis),
        }
    }
}
