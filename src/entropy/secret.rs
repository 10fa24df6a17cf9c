//! User secret and the identity secret derived from a document.

use crate::document::CanonicalFields;
use crate::error::{IdentityError, Result};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Allowed secret length in digits.
const PIN_DIGITS: std::ops::RangeInclusive<usize> = 4..=12;

/// A validated user secret: 4 to 12 ASCII digits.
///
/// Wiped from memory on drop and never shown by `Debug`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret(String);

impl Secret {
    /// Validates a secret that may be absent.
    ///
    /// An absent or empty secret is reported the same way as a malformed one.
    pub fn parse(pin: Option<&str>) -> Result<Self> {
        let pin = pin
            .filter(|p| !p.is_empty())
            .ok_or(IdentityError::MissingSecret("no pin was provided"))?;

        if !PIN_DIGITS.contains(&pin.len()) || !pin.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdentityError::MissingSecret(
                "pin must be a numerical string between 4 and 12 digits",
            ));
        }

        Ok(Self(pin.to_owned()))
    }

    /// Validates a present secret.
    pub fn new(pin: &str) -> Result<Self> {
        Self::parse(Some(pin))
    }

    /// Returns the secret digits.
    #[inline]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secret").finish_non_exhaustive()
    }
}

/// Stable secret bound to a document: hex SHA-256 of its concatenated fields.
///
/// Used as the salt of the key derivation stage.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct IdentitySecret(String);

impl IdentitySecret {
    /// Hashes the concatenation of the canonical field values.
    pub fn derive(fields: &CanonicalFields) -> Self {
        let mut joined = fields.concat();
        let digest = Sha256::digest(joined.as_bytes());
        joined.zeroize();
        Self(hex::encode(digest))
    }

    /// Returns the lowercase hex digest.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the hex digest as bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Debug for IdentitySecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentitySecret").finish_non_exhaustive()
    }
}
