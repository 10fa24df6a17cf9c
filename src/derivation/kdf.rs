//! scrypt key stretching of the entropy seed.
//!
//! The password is the NFKD-normalised entropy seed and the salt is the
//! identity secret, so the stretched key is bound to both the secret and
//! the document.

use crate::error::{IdentityError, Result};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

/// Accepted stretched-key lengths in bytes.
const OUTPUT_LEN: std::ops::RangeInclusive<usize> = 10..=64;

/// scrypt cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KdfParams {
    /// log2 of the CPU/memory cost `N`.
    pub log_n: u8,
    /// Block size.
    pub r: u32,
    /// Parallelism.
    pub p: u32,
    /// Output length in bytes (10 to 64).
    pub output_len: usize,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            log_n: 13,
            r: 8,
            p: 1,
            output_len: 64,
        }
    }
}

impl KdfParams {
    /// Checks the parameters against what scrypt accepts.
    pub fn validate(&self) -> Result<()> {
        self.scrypt_params().map(|_| ())
    }

    /// Stretches `passphrase` with `salt`.
    pub fn derive(&self, passphrase: &str, salt: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let params = self.scrypt_params()?;
        let password = normalize_passphrase(passphrase);

        let mut output = Zeroizing::new(vec![0u8; self.output_len]);
        scrypt::scrypt(password.as_bytes(), salt, &params, &mut output)
            .map_err(|e| IdentityError::Kdf(e.to_string()))?;

        tracing::trace!(
            log_n = self.log_n,
            r = self.r,
            p = self.p,
            output_len = self.output_len,
            "Stretched entropy seed"
        );
        Ok(output)
    }

    fn scrypt_params(&self) -> Result<scrypt::Params> {
        if !OUTPUT_LEN.contains(&self.output_len) {
            return Err(IdentityError::Kdf(format!(
                "output length {} is outside {}..={} bytes",
                self.output_len,
                OUTPUT_LEN.start(),
                OUTPUT_LEN.end()
            )));
        }
        if self.log_n == 0 {
            return Err(IdentityError::Kdf("log_n must be at least 1".into()));
        }
        scrypt::Params::new(self.log_n, self.r, self.p, self.output_len)
            .map_err(|e| IdentityError::Kdf(e.to_string()))
    }
}

/// Unicode NFKD form of `passphrase`.
pub fn normalize_passphrase(passphrase: &str) -> Zeroizing<String> {
    Zeroizing::new(passphrase.nfkd().collect())
}
