//! Deterministic double-shuffle entropy construction.
//!
//! # Construction
//!
//! ```text
//! order    = shuffle(field names, HMAC(secret, concat(values) || i))
//! pre_seed = concat(values in order) || secret
//! checksum = first 6 decimal digits of SHA-256(pre_seed)
//! seed     = shuffle(chars(pre_seed), HMAC(checksum, pre_seed || i)) || checksum
//! ```
//!
//! Both passes are keyed, so the field order cannot be read back from the
//! output without the secret, and no ambient randomness is involved.

use super::rng::KeyedDraw;
use super::secret::Secret;
use crate::document::{CanonicalFields, Field};
use crate::error::{IdentityError, Result};
use num_bigint::BigUint;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Decimal digits of the re-keying checksum.
pub const CHECKSUM_DIGITS: usize = 6;

/// Secret-bound mixing of a document's fields.
///
/// Sensitive and ephemeral: wiped on drop, never shown by `Debug`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EntropySeed {
    value: String,
    checksum: String,
}

impl EntropySeed {
    /// Builds the entropy seed for `secret` and `fields`.
    ///
    /// Fails only if `fields` is empty.
    pub fn construct(secret: &Secret, fields: &CanonicalFields) -> Result<Self> {
        let mut keys: Vec<&Field> = fields.iter().filter(|f| !f.value().is_empty()).collect();
        if keys.is_empty() {
            return Err(IdentityError::InsufficientFields);
        }

        // First pass: field order keyed by the secret.
        let mut data = fields.concat();
        KeyedDraw::new(secret.expose().as_bytes(), data.as_bytes()).shuffle(&mut keys);
        data.zeroize();

        let mut pre_seed: String = keys.iter().map(|f| f.value()).collect();
        pre_seed.push_str(secret.expose());

        let checksum = checksum(&pre_seed);

        // Second pass: characters keyed by the checksum.
        let mut chars: Vec<char> = pre_seed.chars().collect();
        KeyedDraw::new(checksum.as_bytes(), pre_seed.as_bytes()).shuffle(&mut chars);
        pre_seed.zeroize();

        let mut value: String = chars.iter().collect();
        chars.zeroize();
        value.push_str(&checksum);

        tracing::trace!(
            fields = keys.len(),
            seed_len = value.len(),
            "Constructed entropy seed"
        );

        Ok(Self { value, checksum })
    }

    /// Returns the seed string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the seed as bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.value.as_bytes()
    }

    /// Returns the checksum appended to the seed.
    #[inline]
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    /// Returns the seed length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Always false for a constructed seed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl std::fmt::Debug for EntropySeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntropySeed")
            .field("len", &self.value.len())
            .finish_non_exhaustive()
    }
}

/// First decimal digits of SHA-256(`pre_seed`) read as a big-endian integer.
fn checksum(pre_seed: &str) -> String {
    let digest = Sha256::digest(pre_seed.as_bytes());
    let decimal = BigUint::from_bytes_be(&digest).to_str_radix(10);
    decimal.chars().take(CHECKSUM_DIGITS).collect()
}
