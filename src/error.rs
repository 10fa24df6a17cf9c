//! Error types for document validation and seed derivation.

use crate::document::MrzFormat;
use std::fmt;
use thiserror::Error;

/// A single rule broken by a document field or MRZ slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Name of the field or slot the rule applies to.
    pub field: &'static str,
    /// Description of the broken rule.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Every violation found in one validation pass, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a broken rule.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(Violation {
            field,
            message: message.into(),
        });
    }

    /// Returns true if no rule was broken.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the violations in report order.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// Returns the offending field names in report order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|v| v.field).collect()
    }

    /// Fails with [`IdentityError::Grammar`] if anything was recorded.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(IdentityError::Grammar(self))
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

/// MRZ row count or width that fits no supported layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LengthMismatch {
    /// Neither two (Type 3) nor three (Type 1) rows were given.
    #[error("expected 2 rows (Type 3) or 3 rows (Type 1), found {0}")]
    RowCount(usize),

    /// A row is not exactly the width its layout requires.
    #[error("{format} row {row} must be exactly {expected} characters long, found {found}")]
    RowWidth {
        /// Layout selected by the row count.
        format: MrzFormat,
        /// 1-based index of the offending row.
        row: usize,
        /// Width the layout requires.
        expected: usize,
        /// Width of the row, in characters.
        found: usize,
    },
}

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The MRZ has the wrong shape; no grammar check was attempted.
    #[error("MRZ length mismatch: {0}")]
    Length(#[from] LengthMismatch),

    /// One or more fields or slots violate their grammar.
    #[error("invalid document: {0}")]
    Grammar(Violations),

    /// The secret is absent or not 4 to 12 ASCII digits.
    #[error("a 4 to 12-digit pin is required: {0}")]
    MissingSecret(&'static str),

    /// A secret was given but no document field accompanies it.
    #[error("at least one document field besides the pin must be provided")]
    InsufficientFields,

    /// The chain selector names no known hash family.
    #[error("unsupported chain '{0}', available options: ETH, BTC, SOL")]
    UnsupportedChain(String),

    /// The requested mnemonic is not 12, 18, or 24 words.
    #[error("unsupported phrase length {0}, must be 12, 18, or 24 words")]
    UnsupportedPhraseLength(usize),

    /// The key derivation function rejected its parameters.
    #[error("key derivation failed: {0}")]
    Kdf(String),

    /// The mnemonic encoder rejected its input.
    #[error("mnemonic encoding failed: {0}")]
    Mnemonic(String),
}

/// A convenience `Result` type alias using the crate's `IdentityError` type.
pub type Result<T> = std::result::Result<T, IdentityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violations_join_in_order() {
        let mut violations = Violations::new();
        violations.push("birthDate", "must be in the format DDMMYYYY");
        violations.push("height", "must only contain numbers");

        assert_eq!(violations.fields(), vec!["birthDate", "height"]);
        assert_eq!(
            violations.to_string(),
            "birthDate must be in the format DDMMYYYY; height must only contain numbers"
        );
    }

    #[test]
    fn test_empty_violations_pass() {
        assert!(Violations::new().into_result().is_ok());
    }

    #[test]
    fn test_non_empty_violations_fail() {
        let mut violations = Violations::new();
        violations.push("sex", "must only contain Latin characters");

        match violations.into_result() {
            Err(IdentityError::Grammar(report)) => assert_eq!(report.len(), 1),
            other => panic!("expected grammar error, got {:?}", other),
        }
    }
}
