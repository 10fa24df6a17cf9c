//! Seed derivation from the entropy seed to a mnemonic.
//!
//! The entropy seed is stretched with scrypt, hashed with the selected
//! chain's algorithm, truncated to the phrase's entropy size and encoded
//! as a BIP-39 sentence. [`bind_account`] runs the whole flow.

mod account;
mod chain;
mod config;
mod kdf;
mod mnemonic;

pub use account::{bind_account, BindOptions};
pub use chain::Chain;
pub use config::{ConfigError, DerivationConfig, FileConfig};
pub use kdf::{normalize_passphrase, KdfParams};
pub use mnemonic::{encode, validate_mnemonic, MnemonicSentence, PhraseLength};
