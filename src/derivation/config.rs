//! Derivation configuration.
//!
//! Loaded from a TOML file; command-line flags override individual values.
//!
//! ```toml
//! [derivation]
//! chain = "ETH"
//! words = 24
//!
//! [derivation.kdf]
//! log_n = 14
//! ```

use super::account::BindOptions;
use super::chain::Chain;
use super::kdf::KdfParams;
use super::mnemonic::PhraseLength;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Derivation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivationConfig {
    /// Chain whose hash finalises the stretched key.
    pub chain: Chain,
    /// Mnemonic word count (12, 18 or 24).
    pub words: usize,
    /// scrypt cost parameters.
    pub kdf: KdfParams,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            chain: Chain::default(),
            words: PhraseLength::default().word_count(),
            kdf: KdfParams::default(),
        }
    }
}

impl DerivationConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        PhraseLength::try_from(self.words).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.kdf
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(())
    }

    /// Converts to the options consumed by [`bind_account`](super::bind_account).
    pub fn bind_options(&self) -> Result<BindOptions, ConfigError> {
        let phrase_length =
            PhraseLength::try_from(self.words).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(BindOptions {
            chain: self.chain,
            phrase_length,
            kdf: self.kdf,
        })
    }
}

/// Configuration loading errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    /// The file is not valid TOML or has an unknown value.
    #[error("failed to parse config file: {0}")]
    ParseError(String),
    /// A value parsed but is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// `[derivation]` table.
    #[serde(default)]
    pub derivation: DerivationConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates TOML configuration text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.derivation.validate()?;
        Ok(config)
    }
}
