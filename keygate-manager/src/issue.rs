//! Issuing-side helper: serialize, encrypt, and sign a license.

use crate::error::LicenseResult;
use keygate_crypto::{sign, LicenseEncryptor, Password, PrivateKeyData};
use keygate_model::{License, SignedLicense};
use zeroize::Zeroizing;

/// Seals a license into its transportable [`SignedLicense`] form.
///
/// The pipeline mirrors what the manager undoes: the license is serialized,
/// the serialized bytes are encrypted under `password`, and the signature is
/// computed over the *encrypted* bytes so the verifying side can check it
/// before decrypting. The intermediate plaintext is zeroized on return.
pub fn issue_license(
    license: &License,
    signing_key: &PrivateKeyData,
    password: &Password,
    encryptor: &dyn LicenseEncryptor,
) -> LicenseResult<SignedLicense> {
    let plaintext = Zeroizing::new(license.serialize());
    let content = encryptor.encrypt(password, &plaintext)?;
    let signature = sign(signing_key, &content)?;
    Ok(SignedLicense::new(content, signature))
}
