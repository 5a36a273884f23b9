//! Shared test doubles and fixtures for manager tests.

#![allow(dead_code)]

use keygate_crypto::{
    sign, KdfParams, KeyPair, LicenseEncryptor, Password, PasswordEncryptor,
};
use keygate_manager::{
    issue_license, KeyDataProvider, LicenseManagerConfig, LicenseProvider, LicenseResult,
    PasswordProvider,
};
use keygate_model::{License, SignedLicense};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const PASSWORD: &str = "test-password";

/// In-memory license store counting provider calls.
pub struct MemoryLicenseProvider {
    licenses: Mutex<HashMap<String, SignedLicense>>,
    calls: AtomicUsize,
}

impl MemoryLicenseProvider {
    pub fn new() -> Self {
        Self {
            licenses: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn insert(&self, context: &str, signed: SignedLicense) {
        self.licenses
            .lock()
            .unwrap()
            .insert(context.to_string(), signed);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LicenseProvider for MemoryLicenseProvider {
    fn license(&self, context: &str) -> LicenseResult<Option<SignedLicense>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.licenses.lock().unwrap().get(context).cloned())
    }
}

/// Serves a fixed encrypted key-data blob.
pub struct StaticKeyDataProvider(pub Vec<u8>);

impl KeyDataProvider for StaticKeyDataProvider {
    fn encrypted_key_data(&self) -> LicenseResult<Vec<u8>> {
        Ok(self.0.clone())
    }
}

/// Serves a fixed password.
pub struct StaticPasswordProvider(pub String);

impl PasswordProvider for StaticPasswordProvider {
    fn password(&self) -> LicenseResult<Password> {
        Ok(Password::from(self.0.as_str()))
    }
}

/// Everything a manager test needs: the provider double, a part-built
/// configuration, and the issuing-side key pair and encryptor for minting
/// (or corrupting) licenses.
pub struct Fixture {
    pub provider: Arc<MemoryLicenseProvider>,
    pub keys: KeyPair,
    pub encryptor: Arc<dyn LicenseEncryptor>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            provider: Arc::new(MemoryLicenseProvider::new()),
            keys: KeyPair::generate(),
            encryptor: Arc::new(PasswordEncryptor::new(KdfParams::fast_insecure())),
        }
    }

    /// Issues a signed license for `context` backed by this fixture's keys.
    pub fn issue(&self, context: &str, license: &License) {
        let signed = issue_license(
            license,
            &self.keys.private,
            &Password::from(PASSWORD),
            self.encryptor.as_ref(),
        )
        .unwrap();
        self.provider.insert(context, signed);
    }

    /// Stores an already-built signed license (for tamper tests).
    pub fn store_raw(&self, context: &str, signed: SignedLicense) {
        self.provider.insert(context, signed);
    }

    /// Signs arbitrary ciphertext with the fixture keys.
    pub fn sign_bytes(&self, content: &[u8]) -> Vec<u8> {
        sign(&self.keys.private, content).unwrap()
    }

    /// Encrypts arbitrary plaintext under the license password.
    pub fn encrypt_bytes(&self, plaintext: &[u8]) -> Vec<u8> {
        self.encryptor
            .encrypt(&Password::from(PASSWORD), plaintext)
            .unwrap()
    }

    /// Builds a manager configuration wired to this fixture.
    pub fn config(&self) -> LicenseManagerConfig {
        let key_data = self.keys.public.to_bytes().unwrap();
        let encrypted_key_data = self
            .encryptor
            .encrypt(&Password::from(PASSWORD), &key_data)
            .unwrap();

        LicenseManagerConfig::new()
            .license_provider(Arc::clone(&self.provider) as Arc<dyn LicenseProvider>)
            .key_data_provider(Arc::new(StaticKeyDataProvider(encrypted_key_data)))
            .key_password_provider(Arc::new(StaticPasswordProvider(PASSWORD.to_string())))
            .encryptor(Arc::clone(&self.encryptor))
            .cache_ttl_minutes(5)
    }
}
