//! Shared-secret authentication for custom alias registration.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Fixed message both sides are MACed over; only the key varies.
const AUTH_CONTEXT: &[u8] = b"wordlink/customshorten";

/// Checks the `password` parameter against a configured shared secret.
///
/// With no secret configured (unset or empty), every request passes.
/// Comparison uses HMAC-SHA256 with the candidate as key and a constant-time
/// verify against the MAC computed from the configured secret.
pub struct AuthService {
    expected: Option<Vec<u8>>,
}

impl AuthService {
    /// Creates the service; `None` or an empty secret disables the check.
    pub fn new(secret: Option<String>) -> Self {
        let expected = secret
            .filter(|s| !s.is_empty())
            .map(|s| mac_for(&s).finalize().into_bytes().to_vec());

        Self { expected }
    }

    /// Returns whether a secret is configured.
    pub fn is_enabled(&self) -> bool {
        self.expected.is_some()
    }

    /// Verifies the caller-supplied password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if a secret is configured and
    /// `supplied` is missing or does not match.
    pub fn authenticate(&self, supplied: Option<&str>) -> Result<(), AppError> {
        let Some(expected) = &self.expected else {
            return Ok(());
        };

        let supplied = supplied.unwrap_or_default();
        mac_for(supplied)
            .verify_slice(expected)
            .map_err(|_| AppError::Unauthorized)
    }
}

fn mac_for(key: &str) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(AUTH_CONTEXT);
    mac
}
