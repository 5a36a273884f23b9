//! The immutable [`License`] value and its [`LicenseBuilder`].

use crate::error::{LicenseFormatError, ModelResult, LICENSE_FIELD_COUNT};
use crate::feature::Feature;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Seat-count sentinel meaning the license grants unlimited seats.
///
/// Kept at the 32-bit maximum so the serialized decimal matches licenses
/// issued by the legacy tooling.
pub const UNLIMITED_LICENSES: i32 = i32::MAX;

/// An immutable software license.
///
/// Built once via [`LicenseBuilder`] and never mutated afterwards; every
/// accessor returns borrowed or copied data. Equality is deep: all scalar
/// fields plus the feature name→expiry pairs (order-independent, expiry
/// included — note the asymmetry with [`Feature`] equality, which ignores
/// expiry).
#[derive(Debug, Clone)]
pub struct License {
    product_key: String,
    holder: String,
    issuer: String,
    subject: String,
    issue_date: i64,
    good_after_date: i64,
    good_before_date: i64,
    number_of_licenses: i32,
    features: Vec<Feature>,
}

impl License {
    /// Returns the product key.
    #[must_use]
    pub fn product_key(&self) -> &str {
        &self.product_key
    }

    /// Returns the license holder.
    #[must_use]
    pub fn holder(&self) -> &str {
        &self.holder
    }

    /// Returns the issuer.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Returns the licensed subject.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the issue date in epoch milliseconds.
    #[must_use]
    pub fn issue_date(&self) -> i64 {
        self.issue_date
    }

    /// Returns the start of the validity window in epoch milliseconds.
    #[must_use]
    pub fn good_after_date(&self) -> i64 {
        self.good_after_date
    }

    /// Returns the end of the validity window in epoch milliseconds.
    #[must_use]
    pub fn good_before_date(&self) -> i64 {
        self.good_before_date
    }

    /// Returns the seat count, or [`UNLIMITED_LICENSES`].
    #[must_use]
    pub fn number_of_licenses(&self) -> i32 {
        self.number_of_licenses
    }

    /// Returns the features in insertion order.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Looks up a feature by name.
    #[must_use]
    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.name() == name)
    }

    /// Returns true if a feature with `name` exists and is valid at
    /// `at_millis` (a never-expiring feature is valid at any time).
    #[must_use]
    pub fn has_license_for_feature(&self, name: &str, at_millis: i64) -> bool {
        self.feature(name).is_some_and(|f| f.is_valid_at(at_millis))
    }

    /// [`Self::has_license_for_feature`] evaluated at the current time.
    #[must_use]
    pub fn has_license_for_feature_now(&self, name: &str) -> bool {
        self.has_license_for_feature(name, now_millis())
    }

    /// Short-circuiting OR over `names`.
    #[must_use]
    pub fn has_license_for_any_feature(&self, names: &[&str], at_millis: i64) -> bool {
        names
            .iter()
            .any(|name| self.has_license_for_feature(name, at_millis))
    }

    /// Short-circuiting AND over `names`. An empty slice is satisfied.
    #[must_use]
    pub fn has_license_for_all_features(&self, names: &[&str], at_millis: i64) -> bool {
        names
            .iter()
            .all(|name| self.has_license_for_feature(name, at_millis))
    }

    /// [`Self::has_license_for_any_feature`] evaluated at the current time.
    #[must_use]
    pub fn has_license_for_any_feature_now(&self, names: &[&str]) -> bool {
        self.has_license_for_any_feature(names, now_millis())
    }

    /// [`Self::has_license_for_all_features`] evaluated at the current time.
    #[must_use]
    pub fn has_license_for_all_features_now(&self, names: &[&str]) -> bool {
        self.has_license_for_all_features(names, now_millis())
    }

    /// Serializes the license to its UTF-8 wire bytes.
    ///
    /// The rendering is the bit-exact compatibility contract; identical
    /// license values always produce identical bytes.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Parses a license from its wire bytes.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseFormatError`] if the bytes are not UTF-8, the outer
    /// brackets are missing, the data does not split into exactly nine
    /// fields, or any numeric field fails to parse.
    ///
    /// The wire format is unescaped: a string field that itself contains the
    /// `][` delimiter shifts the field count and is rejected here as
    /// [`LicenseFormatError::FieldCount`]. This fragility is inherited from
    /// the legacy format and preserved for compatibility.
    pub fn deserialize(bytes: &[u8]) -> ModelResult<Self> {
        let text = std::str::from_utf8(bytes).map_err(|_| LicenseFormatError::InvalidUtf8)?;
        text.parse()
    }
}

impl FromStr for License {
    type Err = LicenseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or(LicenseFormatError::MissingBrackets)?;

        // Empty-preserving split; string fields may legitimately be empty.
        let parts: Vec<&str> = inner.split("][").collect();
        if parts.len() != LICENSE_FIELD_COUNT {
            return Err(LicenseFormatError::FieldCount(parts.len()));
        }

        let mut builder = LicenseBuilder::new()
            .product_key(parts[0])
            .holder(parts[1])
            .issuer(parts[2])
            .subject(parts[3])
            .issue_date(parse_number(parts[4], "issueDate")?)
            .good_after_date(parse_number(parts[5], "goodAfterDate")?)
            .good_before_date(parse_number(parts[6], "goodBeforeDate")?)
            .number_of_licenses(parse_number(parts[7], "numberOfLicenses")?);

        for feature in parse_features(parts[8])? {
            builder = builder.feature(feature);
        }

        Ok(builder.build())
    }
}

fn parse_number<T: FromStr>(value: &str, field: &'static str) -> ModelResult<T> {
    value.parse().map_err(|_| LicenseFormatError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_features(blob: &str) -> ModelResult<Vec<Feature>> {
    let inner = blob
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| LicenseFormatError::MalformedFeature(blob.to_string()))?;

    if inner.is_empty() {
        return Ok(Vec::new());
    }

    inner.split(", ").map(Feature::parse).collect()
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}][{}][{}][{}][{}][{}][{}][{}][[",
            self.product_key,
            self.holder,
            self.issuer,
            self.subject,
            self.issue_date,
            self.good_after_date,
            self.good_before_date,
            self.number_of_licenses,
        )?;
        for (i, feature) in self.features.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{feature}")?;
        }
        write!(f, "]]")
    }
}

impl License {
    fn feature_map(&self) -> BTreeMap<&str, i64> {
        self.features
            .iter()
            .map(|f| (f.name(), f.good_before_date()))
            .collect()
    }
}

impl PartialEq for License {
    fn eq(&self, other: &Self) -> bool {
        self.product_key == other.product_key
            && self.holder == other.holder
            && self.issuer == other.issuer
            && self.subject == other.subject
            && self.issue_date == other.issue_date
            && self.good_after_date == other.good_after_date
            && self.good_before_date == other.good_before_date
            && self.number_of_licenses == other.number_of_licenses
            && self.feature_map() == other.feature_map()
    }
}

impl Eq for License {}

impl Hash for License {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.product_key.hash(state);
        self.holder.hash(state);
        self.issuer.hash(state);
        self.subject.hash(state);
        self.issue_date.hash(state);
        self.good_after_date.hash(state);
        self.good_before_date.hash(state);
        self.number_of_licenses.hash(state);
        // Sorted so Hash agrees with the order-independent Eq.
        for (name, expiry) in self.feature_map() {
            name.hash(state);
            expiry.hash(state);
        }
    }
}

/// Mutable accumulator for building a [`License`].
///
/// All fields are optional; scalars default to the empty string or zero,
/// the issue date defaults to the builder's construction time, and the seat
/// count defaults to [`UNLIMITED_LICENSES`]. The builder stays usable after
/// [`LicenseBuilder::build`].
#[derive(Debug, Clone)]
pub struct LicenseBuilder {
    product_key: String,
    holder: String,
    issuer: String,
    subject: String,
    issue_date: i64,
    good_after_date: i64,
    good_before_date: i64,
    number_of_licenses: i32,
    features: Vec<Feature>,
}

impl LicenseBuilder {
    /// Creates a builder with default field values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            product_key: String::new(),
            holder: String::new(),
            issuer: String::new(),
            subject: String::new(),
            issue_date: now_millis(),
            good_after_date: 0,
            good_before_date: 0,
            number_of_licenses: UNLIMITED_LICENSES,
            features: Vec::new(),
        }
    }

    /// Sets the product key.
    #[must_use]
    pub fn product_key(mut self, value: impl Into<String>) -> Self {
        self.product_key = value.into();
        self
    }

    /// Sets the license holder.
    #[must_use]
    pub fn holder(mut self, value: impl Into<String>) -> Self {
        self.holder = value.into();
        self
    }

    /// Sets the issuer.
    #[must_use]
    pub fn issuer(mut self, value: impl Into<String>) -> Self {
        self.issuer = value.into();
        self
    }

    /// Sets the licensed subject.
    #[must_use]
    pub fn subject(mut self, value: impl Into<String>) -> Self {
        self.subject = value.into();
        self
    }

    /// Sets the issue date (epoch milliseconds).
    #[must_use]
    pub fn issue_date(mut self, millis: i64) -> Self {
        self.issue_date = millis;
        self
    }

    /// Sets the start of the validity window (epoch milliseconds).
    #[must_use]
    pub fn good_after_date(mut self, millis: i64) -> Self {
        self.good_after_date = millis;
        self
    }

    /// Sets the end of the validity window (epoch milliseconds).
    #[must_use]
    pub fn good_before_date(mut self, millis: i64) -> Self {
        self.good_before_date = millis;
        self
    }

    /// Sets the seat count.
    #[must_use]
    pub fn number_of_licenses(mut self, count: i32) -> Self {
        self.number_of_licenses = count;
        self
    }

    /// Adds a feature. Adding a feature whose name matches an existing one
    /// replaces its expiry but keeps the original insertion position.
    #[must_use]
    pub fn feature(mut self, feature: Feature) -> Self {
        match self.features.iter().position(|f| f.name() == feature.name()) {
            Some(index) => self.features[index] = feature,
            None => self.features.push(feature),
        }
        self
    }

    /// Freezes the accumulated state into a [`License`].
    #[must_use]
    pub fn build(&self) -> License {
        License {
            product_key: self.product_key.clone(),
            holder: self.holder.clone(),
            issuer: self.issuer.clone(),
            subject: self.subject.clone(),
            issue_date: self.issue_date,
            good_after_date: self.good_after_date,
            good_before_date: self.good_before_date,
            number_of_licenses: self.number_of_licenses,
            features: self.features.clone(),
        }
    }
}

impl Default for LicenseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
