//! Identity-Bound Seed Derivation Library
//!
//! Turns identity-document data plus a numeric PIN into a deterministic
//! BIP-39 mnemonic. The same document and PIN always give the same
//! sentence.
//!
//! # Architecture
//!
//! The system follows an explicit data flow:
//!
//! ```text
//! document → canonical fields → entropy seed → scrypt → chain hash → mnemonic
//!  (manual,          ↓               ↑
//!   MRZ)       identity secret ──────┘ (salt)
//! ```
//!
//! # Design Principles
//!
//! - **Deterministic**: No ambient randomness; every draw is an HMAC of its inputs
//! - **Fail-closed**: Any grammar violation rejects the whole document
//! - **Uses standard primitives**: SHA-2, Keccak, HMAC, scrypt and BIP-39 from audited crates
//! - **Never reveals secrets**: PINs, seeds and sentences are zeroized and redacted in `Debug`
//!
//! # Example
//!
//! ```no_run
//! use identity_seed::{bind_account, BindOptions, DocumentInput, ManualInput};
//!
//! let input: DocumentInput = ManualInput {
//!     names: Some("ERIKA".into()),
//!     surname: Some("MUSTERMANN".into()),
//!     birth_date: Some("12081983".into()),
//!     doc_num: Some("L01X00T47".into()),
//!     ..Default::default()
//! }
//! .into();
//!
//! let sentence = bind_account(Some("123456"), &input, &BindOptions::default()).unwrap();
//! assert_eq!(sentence.word_count(), 12);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod derivation;
pub mod document;
pub mod entropy;
pub mod error;

// Re-export commonly used types at crate root
pub use derivation::{
    bind_account, BindOptions, Chain, FileConfig, KdfParams, MnemonicSentence, PhraseLength,
};
pub use document::{
    CanonicalFields, DocumentInput, ManualInput, MrzFormat, MrzInput, Type1Mrz, Type3Mrz,
};
pub use entropy::{EntropySeed, IdentitySecret, Secret};
pub use error::{IdentityError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
