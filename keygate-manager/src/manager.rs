//! The license manager: retrieval, verification, caching, validation.

use crate::cache::{ttl_millis, LicenseCache};
use crate::error::{LicenseError, LicenseResult};
use crate::provider::{KeyDataProvider, LicenseProvider, PasswordProvider};
use crate::requirement::FeatureRequirement;
use crate::validator::LicenseValidator;
use keygate_crypto::{verify, LicenseEncryptor, PasswordEncryptor, PublicKeyData};
use keygate_model::License;
use std::sync::Arc;
use tracing::{debug, info};
use zeroize::Zeroizing;

/// Cache TTL used when the configuration does not set one.
pub const DEFAULT_CACHE_TTL_MINUTES: u64 = 60;

type Clock = Box<dyn Fn() -> i64 + Send + Sync>;

/// Configuration for [`LicenseManager::new`].
///
/// The license provider, key-data provider, and key password provider are
/// required; construction fails fast without them. The license password
/// provider defaults to the key password provider, the encryptor defaults
/// to [`PasswordEncryptor`], and an absent validator means every license is
/// accepted as-is.
#[derive(Default)]
pub struct LicenseManagerConfig {
    license_provider: Option<Arc<dyn LicenseProvider>>,
    key_data_provider: Option<Arc<dyn KeyDataProvider>>,
    key_password_provider: Option<Arc<dyn PasswordProvider>>,
    license_password_provider: Option<Arc<dyn PasswordProvider>>,
    validator: Option<Arc<dyn LicenseValidator>>,
    encryptor: Option<Arc<dyn LicenseEncryptor>>,
    cache_ttl_minutes: Option<u64>,
}

impl LicenseManagerConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the license provider (required).
    #[must_use]
    pub fn license_provider(mut self, provider: Arc<dyn LicenseProvider>) -> Self {
        self.license_provider = Some(provider);
        self
    }

    /// Sets the key-data provider (required).
    #[must_use]
    pub fn key_data_provider(mut self, provider: Arc<dyn KeyDataProvider>) -> Self {
        self.key_data_provider = Some(provider);
        self
    }

    /// Sets the password provider for decrypting key data (required).
    #[must_use]
    pub fn key_password_provider(mut self, provider: Arc<dyn PasswordProvider>) -> Self {
        self.key_password_provider = Some(provider);
        self
    }

    /// Sets the password provider for decrypting license content.
    /// Defaults to the key password provider.
    #[must_use]
    pub fn license_password_provider(mut self, provider: Arc<dyn PasswordProvider>) -> Self {
        self.license_password_provider = Some(provider);
        self
    }

    /// Sets the validator. Absent means "always valid" — a deliberate
    /// escape hatch, not an error.
    #[must_use]
    pub fn validator(mut self, validator: Arc<dyn LicenseValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Sets the encryptor. Defaults to [`PasswordEncryptor`].
    #[must_use]
    pub fn encryptor(mut self, encryptor: Arc<dyn LicenseEncryptor>) -> Self {
        self.encryptor = Some(encryptor);
        self
    }

    /// Sets the cache TTL in whole minutes. Values under one minute are
    /// coerced to a ten-second floor.
    #[must_use]
    pub fn cache_ttl_minutes(mut self, minutes: u64) -> Self {
        self.cache_ttl_minutes = Some(minutes);
        self
    }
}

/// Orchestrates license retrieval, decryption, verification, caching, and
/// validation.
///
/// There is no global state: each manager instance owns its own cache and
/// collaborators, so multiple independent managers can coexist (e.g. in
/// tests). All operations are synchronous, blocking CPU work, safe on any
/// worker thread; the internal cache lock makes the lookup-or-populate
/// sequence atomic per call.
pub struct LicenseManager {
    license_provider: Arc<dyn LicenseProvider>,
    key_data_provider: Arc<dyn KeyDataProvider>,
    key_password_provider: Arc<dyn PasswordProvider>,
    license_password_provider: Arc<dyn PasswordProvider>,
    validator: Option<Arc<dyn LicenseValidator>>,
    encryptor: Arc<dyn LicenseEncryptor>,
    cache: LicenseCache,
    clock: Clock,
}

impl std::fmt::Debug for LicenseManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LicenseManager").finish_non_exhaustive()
    }
}

impl LicenseManager {
    /// Builds a manager from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Configuration`] if the license provider, the
    /// key-data provider, or the key password provider is missing.
    pub fn new(config: LicenseManagerConfig) -> LicenseResult<Self> {
        Self::with_clock(config, Box::new(|| chrono::Utc::now().timestamp_millis()))
    }

    pub(crate) fn with_clock(config: LicenseManagerConfig, clock: Clock) -> LicenseResult<Self> {
        let license_provider = config
            .license_provider
            .ok_or_else(|| LicenseError::Configuration("license provider is required".into()))?;
        let key_data_provider = config
            .key_data_provider
            .ok_or_else(|| LicenseError::Configuration("key data provider is required".into()))?;
        let key_password_provider = config.key_password_provider.ok_or_else(|| {
            LicenseError::Configuration("key password provider is required".into())
        })?;
        let license_password_provider = config
            .license_password_provider
            .unwrap_or_else(|| Arc::clone(&key_password_provider));
        let encryptor = config
            .encryptor
            .unwrap_or_else(|| Arc::new(PasswordEncryptor::default()));
        let ttl_ms = ttl_millis(config.cache_ttl_minutes.unwrap_or(DEFAULT_CACHE_TTL_MINUTES));

        Ok(Self {
            license_provider,
            key_data_provider,
            key_password_provider,
            license_password_provider,
            validator: config.validator,
            encryptor,
            cache: LicenseCache::new(ttl_ms),
            clock,
        })
    }

    /// Returns the license bound to `context`, or `None` if the provider has
    /// no license for it.
    ///
    /// A cached, unexpired license is returned directly without re-verifying
    /// or re-decrypting. On a miss the full pipeline runs: fetch, verify
    /// signature, decrypt, deserialize, cache.
    ///
    /// # Errors
    ///
    /// [`LicenseError::InvalidContext`] for a blank context; provider,
    /// crypto, and format errors propagate unchanged.
    pub fn license(&self, context: &str) -> LicenseResult<Option<Arc<License>>> {
        if context.trim().is_empty() {
            return Err(LicenseError::InvalidContext);
        }

        let now = (self.clock)();
        self.cache
            .get_or_populate(context, now, || self.fetch_and_decode(context))
    }

    /// Runs the fetch → verify → decrypt → deserialize pipeline.
    ///
    /// Secret intermediates (passwords, decrypted key data, decrypted
    /// license text, and the working copies of the encrypted buffers)
    /// zeroize on drop, on success and error paths alike; the signed
    /// license buffers are erased as soon as the content has been
    /// decrypted.
    fn fetch_and_decode(&self, context: &str) -> LicenseResult<Option<Arc<License>>> {
        let Some(mut signed) = self.license_provider.license(context)? else {
            debug!(context, "no license available from provider");
            return Ok(None);
        };

        let encrypted_key_data = Zeroizing::new(self.key_data_provider.encrypted_key_data()?);
        let key_password = self.key_password_provider.password()?;
        let key_data = self.encryptor.decrypt(&key_password, &encrypted_key_data)?;
        drop(key_password);
        let public_key = PublicKeyData::from_bytes(&key_data)?;
        drop(key_data);
        drop(encrypted_key_data);

        // Signature covers the encrypted content; verify before decrypting.
        let content = Zeroizing::new(signed.content());
        verify(&public_key, &content, &signed.signature())?;

        let license_password = self.license_password_provider.password()?;
        let plaintext = self.encryptor.decrypt(&license_password, &content)?;
        drop(license_password);
        signed.erase();

        let license = License::deserialize(&plaintext)?;
        info!(
            context,
            holder = license.holder(),
            subject = license.subject(),
            "license verified"
        );
        Ok(Some(Arc::new(license)))
    }

    /// Validates `license` with the configured validator, if any.
    pub fn validate(&self, license: &License) -> LicenseResult<()> {
        match &self.validator {
            Some(validator) => validator.validate(license),
            None => Ok(()),
        }
    }

    /// Returns true if the context's license grants `feature` right now.
    ///
    /// A missing license yields `Ok(false)` — by design, "no license" and
    /// "license lacking the feature" look identical to feature-gated call
    /// sites. Validation failures propagate as errors.
    pub fn has_license_for_feature(&self, context: &str, feature: &str) -> LicenseResult<bool> {
        self.feature_check(context, |license, now| {
            license.has_license_for_feature(feature, now)
        })
    }

    /// Short-circuiting OR over `features` for the context's license.
    pub fn has_license_for_any_feature(
        &self,
        context: &str,
        features: &[&str],
    ) -> LicenseResult<bool> {
        self.feature_check(context, |license, now| {
            license.has_license_for_any_feature(features, now)
        })
    }

    /// Short-circuiting AND over `features` for the context's license.
    pub fn has_license_for_all_features(
        &self,
        context: &str,
        features: &[&str],
    ) -> LicenseResult<bool> {
        self.feature_check(context, |license, now| {
            license.has_license_for_all_features(features, now)
        })
    }

    /// Resolves a [`FeatureRequirement`] against the context's license.
    pub fn check_requirement(
        &self,
        context: &str,
        requirement: &FeatureRequirement,
    ) -> LicenseResult<bool> {
        self.feature_check(context, |license, now| {
            requirement.is_satisfied_by(license, now)
        })
    }

    fn feature_check(
        &self,
        context: &str,
        check: impl FnOnce(&License, i64) -> bool,
    ) -> LicenseResult<bool> {
        let Some(license) = self.license(context)? else {
            return Ok(false);
        };
        self.validate(&license)?;
        Ok(check(&license, (self.clock)()))
    }

    /// Drops every cached license; subsequent lookups re-fetch, re-verify,
    /// and re-decrypt. Call after rotating stored license data.
    pub fn clear_cache(&self) {
        self.cache.clear();
        debug!("license cache cleared");
    }
}
