//! BIP-39 mnemonic encoding of the chain digest.

use crate::error::{IdentityError, Result};
use bip39::Mnemonic;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Supported mnemonic sentence lengths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PhraseLength {
    /// 12 words, 128 bits of entropy.
    #[default]
    Words12,
    /// 18 words, 192 bits of entropy.
    Words18,
    /// 24 words, 256 bits of entropy.
    Words24,
}

impl PhraseLength {
    /// Number of words in the sentence.
    pub fn word_count(self) -> usize {
        match self {
            PhraseLength::Words12 => 12,
            PhraseLength::Words18 => 18,
            PhraseLength::Words24 => 24,
        }
    }

    /// Entropy encoded by the sentence, in bits.
    pub fn entropy_bits(self) -> usize {
        match self {
            PhraseLength::Words12 => 128,
            PhraseLength::Words18 => 192,
            PhraseLength::Words24 => 256,
        }
    }

    /// Entropy encoded by the sentence, in bytes.
    pub fn entropy_bytes(self) -> usize {
        self.entropy_bits() / 8
    }
}

impl TryFrom<usize> for PhraseLength {
    type Error = IdentityError;

    fn try_from(words: usize) -> Result<Self> {
        match words {
            12 => Ok(PhraseLength::Words12),
            18 => Ok(PhraseLength::Words18),
            24 => Ok(PhraseLength::Words24),
            other => Err(IdentityError::UnsupportedPhraseLength(other)),
        }
    }
}

impl fmt::Display for PhraseLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} words", self.word_count())
    }
}

/// An English BIP-39 sentence.
///
/// `Display` prints the words; `Debug` only the count.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct MnemonicSentence(String);

impl MnemonicSentence {
    /// Returns the space-separated sentence.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the words.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }

    /// Returns the number of words.
    pub fn word_count(&self) -> usize {
        self.words().count()
    }
}

impl fmt::Display for MnemonicSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for MnemonicSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MnemonicSentence")
            .field("words", &self.word_count())
            .finish_non_exhaustive()
    }
}

/// Encodes the leading `length.entropy_bytes()` of `entropy` as a sentence.
///
/// Fails with [`IdentityError::Mnemonic`] if `entropy` is too short.
pub fn encode(entropy: &[u8], length: PhraseLength) -> Result<MnemonicSentence> {
    let needed = length.entropy_bytes();
    let truncated = entropy.get(..needed).ok_or_else(|| {
        IdentityError::Mnemonic(format!(
            "{} bytes of entropy required, {} available",
            needed,
            entropy.len()
        ))
    })?;

    let mnemonic =
        Mnemonic::from_entropy(truncated).map_err(|e| IdentityError::Mnemonic(e.to_string()))?;
    Ok(MnemonicSentence(mnemonic.to_string()))
}

/// Checks that `sentence` is a valid BIP-39 sentence of `length` words.
pub fn validate_mnemonic(sentence: &str, length: PhraseLength) -> Result<()> {
    let mnemonic =
        Mnemonic::parse_normalized(sentence).map_err(|e| IdentityError::Mnemonic(e.to_string()))?;
    if mnemonic.word_count() != length.word_count() {
        return Err(IdentityError::UnsupportedPhraseLength(mnemonic.word_count()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_lengths() {
        for (words, bits) in [(12, 128), (18, 192), (24, 256)] {
            let length = PhraseLength::try_from(words).unwrap();
            assert_eq!(length.word_count(), words);
            assert_eq!(length.entropy_bits(), bits);
        }
    }

    #[test]
    fn test_unsupported_length_rejected() {
        for words in [0, 11, 15, 21, 25] {
            assert!(matches!(
                PhraseLength::try_from(words),
                Err(IdentityError::UnsupportedPhraseLength(n)) if n == words
            ));
        }
    }

    #[test]
    fn test_zero_entropy_vector() {
        let sentence = encode(&[0u8; 32], PhraseLength::Words12).unwrap();
        assert_eq!(
            sentence.as_str(),
            "abandon abandon abandon abandon abandon abandon \
             abandon abandon abandon abandon abandon about"
        );
    }

    #[test]
    fn test_encode_word_counts_and_validity() {
        let entropy: Vec<u8> = (0u8..64).collect();
        for length in [
            PhraseLength::Words12,
            PhraseLength::Words18,
            PhraseLength::Words24,
        ] {
            let sentence = encode(&entropy, length).unwrap();
            assert_eq!(sentence.word_count(), length.word_count());
            validate_mnemonic(sentence.as_str(), length).unwrap();
        }
    }

    #[test]
    fn test_short_entropy_rejected() {
        assert!(matches!(
            encode(&[7u8; 16], PhraseLength::Words24),
            Err(IdentityError::Mnemonic(_))
        ));
    }

    #[test]
    fn test_validate_rejects_wrong_length_and_garbage() {
        let sentence = encode(&[1u8; 32], PhraseLength::Words12).unwrap();
        assert!(matches!(
            validate_mnemonic(sentence.as_str(), PhraseLength::Words24),
            Err(IdentityError::UnsupportedPhraseLength(12))
        ));
        assert!(matches!(
            validate_mnemonic("not a real mnemonic", PhraseLength::Words12),
            Err(IdentityError::Mnemonic(_))
        ));
    }

    #[test]
    fn test_debug_hides_words() {
        let sentence = encode(&[0u8; 16], PhraseLength::Words12).unwrap();
        assert!(!format!("{:?}", sentence).contains("abandon"));
    }
}
