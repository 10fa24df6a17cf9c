//! End-to-end binding of a document and secret to a mnemonic.

use super::chain::Chain;
use super::kdf::KdfParams;
use super::mnemonic::{encode, MnemonicSentence, PhraseLength};
use crate::document::DocumentInput;
use crate::entropy::{EntropySeed, IdentitySecret, Secret};
use crate::error::Result;

/// Options for [`bind_account`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindOptions {
    /// Chain whose hash finalises the stretched key.
    pub chain: Chain,
    /// Length of the produced sentence.
    pub phrase_length: PhraseLength,
    /// scrypt cost parameters.
    pub kdf: KdfParams,
}

/// Derives the mnemonic bound to `pin` and `input`.
///
/// The secret is checked before the document, so a missing pin is
/// reported even when the document is also invalid.
///
/// ```text
/// fields   = validate(input)
/// seed     = EntropySeed::construct(secret, fields)
/// salt     = hex(SHA-256(concat(fields)))
/// key      = scrypt(NFKD(seed), salt)
/// entropy  = chain.digest(key)[..phrase bits]
/// mnemonic = BIP-39(entropy)
/// ```
pub fn bind_account(
    pin: Option<&str>,
    input: &DocumentInput,
    opts: &BindOptions,
) -> Result<MnemonicSentence> {
    let secret = Secret::parse(pin)?;
    let fields = input.canonical_fields()?;

    let seed = EntropySeed::construct(&secret, &fields)?;
    let identity = IdentitySecret::derive(&fields);

    let stretched = opts.kdf.derive(seed.as_str(), identity.as_bytes())?;
    let digest = opts.chain.digest(&stretched);
    let sentence = encode(&digest, opts.phrase_length)?;

    tracing::debug!(
        kind = input.kind(),
        fields = fields.len(),
        chain = %opts.chain,
        algorithm = opts.chain.algorithm(),
        words = sentence.word_count(),
        "Bound account to document"
    );

    Ok(sentence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivation::mnemonic::validate_mnemonic;
    use crate::document::{ManualInput, Type3Mrz};
    use crate::error::IdentityError;

    fn fast(chain: Chain, phrase_length: PhraseLength) -> BindOptions {
        BindOptions {
            chain,
            phrase_length,
            kdf: KdfParams {
                log_n: 4,
                ..KdfParams::default()
            },
        }
    }

    fn erika() -> DocumentInput {
        ManualInput {
            names: Some("ERIKA".into()),
            surname: Some("MUSTERMANN".into()),
            birth_date: Some("12081983".into()),
            doc_num: Some("L01X00T47".into()),
            ..Default::default()
        }
        .into()
    }

    #[test]
    fn test_deterministic() {
        let opts = fast(Chain::Eth, PhraseLength::Words12);
        let a = bind_account(Some("123456"), &erika(), &opts).unwrap();
        let b = bind_account(Some("123456"), &erika(), &opts).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_word_counts_are_valid_bip39() {
        for length in [
            PhraseLength::Words12,
            PhraseLength::Words18,
            PhraseLength::Words24,
        ] {
            for chain in [Chain::Btc, Chain::Eth, Chain::Sol] {
                let opts = fast(chain, length);
                let sentence = bind_account(Some("123456"), &erika(), &opts).unwrap();
                assert_eq!(sentence.word_count(), length.word_count());
                validate_mnemonic(sentence.as_str(), length).unwrap();
            }
        }
    }

    #[test]
    fn test_chain_changes_sentence() {
        let eth = fast(Chain::Eth, PhraseLength::Words12);
        let btc = fast(Chain::Btc, PhraseLength::Words12);
        assert_ne!(
            bind_account(Some("123456"), &erika(), &eth).unwrap(),
            bind_account(Some("123456"), &erika(), &btc).unwrap()
        );
    }

    #[test]
    fn test_secret_changes_sentence() {
        let opts = fast(Chain::Eth, PhraseLength::Words12);
        let a = bind_account(Some("123456"), &erika(), &opts).unwrap();
        let b = bind_account(Some("654321"), &erika(), &opts).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_mrz_document_binds() {
        let input: DocumentInput = Type3Mrz::new(
            "P<D<<MUSTERMANN<<ERIKA<<<<<<<<<<<<<<<<<<<<<<",
            "C01X00T478D<<6408125F2702283<<<<<<<<<<<<<<<4",
        )
        .into();
        let opts = fast(Chain::Sol, PhraseLength::Words24);
        assert_eq!(
            bind_account(Some("1234"), &input, &opts).unwrap().word_count(),
            24
        );
    }

    #[test]
    fn test_secret_checked_before_document() {
        let invalid = ManualInput {
            height: Some("tall".into()),
            ..Default::default()
        };
        let result = bind_account(None, &invalid.into(), &BindOptions::default());
        assert!(matches!(result, Err(IdentityError::MissingSecret(_))));
    }

    #[test]
    fn test_secret_without_document_rejected() {
        let result = bind_account(
            Some("123456"),
            &ManualInput::default().into(),
            &BindOptions::default(),
        );
        assert!(matches!(result, Err(IdentityError::InsufficientFields)));
    }
}
