//! Pluggable license validity policy.

use crate::error::{LicenseError, LicenseResult};
use chrono::{TimeZone, Utc};
use keygate_model::License;

/// Policy deciding whether a decrypted, signature-verified license is
/// currently acceptable.
pub trait LicenseValidator: Send + Sync {
    /// Succeeds silently for a valid license.
    ///
    /// # Errors
    ///
    /// Returns a [`LicenseError`] answering `is_invalid_license()` when the
    /// license is rejected.
    fn validate(&self, license: &License) -> LicenseResult<()>;
}

/// Stateless validator checking the temporal validity window.
///
/// Rejects with [`LicenseError::Expired`] once the current time passes
/// `good_before_date` and with [`LicenseError::NotYetValid`] before
/// `good_after_date`. Both messages carry the subject, the holder, and the
/// violated boundary date.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateValidator;

impl DateValidator {
    fn validate_at(&self, license: &License, now: i64) -> LicenseResult<()> {
        if now > license.good_before_date() {
            return Err(LicenseError::Expired {
                subject: license.subject().to_string(),
                holder: license.holder().to_string(),
                date: format_millis(license.good_before_date()),
            });
        }
        if now < license.good_after_date() {
            return Err(LicenseError::NotYetValid {
                subject: license.subject().to_string(),
                holder: license.holder().to_string(),
                date: format_millis(license.good_after_date()),
            });
        }
        Ok(())
    }
}

impl LicenseValidator for DateValidator {
    fn validate(&self, license: &License) -> LicenseResult<()> {
        self.validate_at(license, Utc::now().timestamp_millis())
    }
}

fn format_millis(millis: i64) -> String {
    match Utc.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("{millis} ms since epoch"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keygate_model::LicenseBuilder;

    fn window(after: i64, before: i64) -> License {
        LicenseBuilder::new()
            .subject("widget-pro")
            .holder("Acme")
            .good_after_date(after)
            .good_before_date(before)
            .build()
    }

    #[test]
    fn inside_window_is_valid() {
        let license = window(1_000, 2_000);
        assert!(DateValidator.validate_at(&license, 1_500).is_ok());
    }

    #[test]
    fn boundaries_are_inclusive() {
        let license = window(1_000, 2_000);
        assert!(DateValidator.validate_at(&license, 1_000).is_ok());
        assert!(DateValidator.validate_at(&license, 2_000).is_ok());
    }

    #[test]
    fn past_window_is_expired() {
        let license = window(1_000, 2_000);
        let err = DateValidator.validate_at(&license, 2_001).unwrap_err();
        assert!(matches!(err, LicenseError::Expired { .. }));
        let msg = format!("{err}");
        assert!(msg.contains("widget-pro"));
        assert!(msg.contains("Acme"));
    }

    #[test]
    fn before_window_is_not_yet_valid() {
        let license = window(1_000, 2_000);
        let err = DateValidator.validate_at(&license, 999).unwrap_err();
        assert!(matches!(err, LicenseError::NotYetValid { .. }));
        assert!(err.is_invalid_license());
    }
}
