//! Error types for the license model.

use thiserror::Error;

/// Number of `][`-delimited parts a serialized license must have.
pub(crate) const LICENSE_FIELD_COUNT: usize = 9;

/// Errors raised while parsing serialized license data.
///
/// All of these mean the input is corrupted or foreign; none are retryable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LicenseFormatError {
    /// The data is not wrapped in a leading `[` and trailing `]`.
    #[error("license data is not wrapped in brackets")]
    MissingBrackets,

    /// The data did not split into exactly nine fields.
    #[error("license data has {0} fields, expected {LICENSE_FIELD_COUNT}")]
    FieldCount(usize),

    /// A numeric field failed to parse.
    #[error("invalid numeric value for {field}: {value:?}")]
    InvalidNumber {
        /// Name of the offending field.
        field: &'static str,
        /// The raw text that failed to parse.
        value: String,
    },

    /// A feature entry is missing its separator or has a bad expiry.
    #[error("malformed feature entry: {0:?}")]
    MalformedFeature(String),

    /// The raw bytes are not valid UTF-8.
    #[error("license data is not valid UTF-8")]
    InvalidUtf8,
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, LicenseFormatError>;
