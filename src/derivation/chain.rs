//! Chain-specific final hashing.

use crate::error::IdentityError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use sha3::Keccak256;
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

/// Target chain family, selecting the final hash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Chain {
    /// Bitcoin family: SHA-256.
    Btc,
    /// Ethereum family: Keccak-256.
    #[default]
    Eth,
    /// Solana family: SHA-512.
    Sol,
}

impl Chain {
    /// Hashes `data` with the chain's algorithm.
    pub fn digest(self, data: &[u8]) -> Zeroizing<Vec<u8>> {
        let digest = match self {
            Chain::Btc => Sha256::digest(data).to_vec(),
            Chain::Eth => Keccak256::digest(data).to_vec(),
            Chain::Sol => Sha512::digest(data).to_vec(),
        };
        Zeroizing::new(digest)
    }

    /// Name of the hash algorithm.
    pub fn algorithm(self) -> &'static str {
        match self {
            Chain::Btc => "sha256",
            Chain::Eth => "keccak256",
            Chain::Sol => "sha512",
        }
    }

    /// Digest size in bytes.
    pub fn digest_len(self) -> usize {
        match self {
            Chain::Btc | Chain::Eth => 32,
            Chain::Sol => 64,
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chain::Btc => f.write_str("BTC"),
            Chain::Eth => f.write_str("ETH"),
            Chain::Sol => f.write_str("SOL"),
        }
    }
}

impl FromStr for Chain {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BTC" => Ok(Chain::Btc),
            "ETH" => Ok(Chain::Eth),
            "SOL" => Ok(Chain::Sol),
            _ => Err(IdentityError::UnsupportedChain(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Chain {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Chain> for String {
    fn from(chain: Chain) -> Self {
        chain.to_string()
    }
}
