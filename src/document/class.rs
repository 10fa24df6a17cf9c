//! Character classes for document fields and MRZ slots.
//!
//! Each class is backed by a regex compiled once per process and shared
//! across calls.

use regex::Regex;
use std::sync::LazyLock;

static ALPHA: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Z]+$"));
static ALPHA_FILLER: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Z<]+$"));
static ALPHANUM_FILLER: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Z0-9<]+$"));
static NUMERIC: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]+$"));
static NUMERIC_FILLER: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9<]+$"));
static LATIN: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Za-z]+$"));
static ALPHANUMERIC: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Za-z0-9]+$"));
static DATE: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]{8}$"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid field class pattern")
}

/// Character class a field or slot must match in full.
///
/// The MRZ classes accept only upper-case letters, as ICAO 9303 does.
/// The manual classes accept either case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClass {
    /// `A-Z`.
    Alpha,
    /// `A-Z` or filler.
    AlphaFiller,
    /// `A-Z`, `0-9`, or filler.
    AlphaNumFiller,
    /// `0-9`.
    Numeric,
    /// `0-9` or filler.
    NumericFiller,
    /// `A-Z` or `a-z`.
    Latin,
    /// `A-Z`, `a-z`, or `0-9`.
    AlphaNumeric,
    /// Eight digits, `DDMMYYYY`.
    Date,
}

impl FieldClass {
    fn regex(self) -> &'static Regex {
        match self {
            FieldClass::Alpha => &*ALPHA,
            FieldClass::AlphaFiller => &*ALPHA_FILLER,
            FieldClass::AlphaNumFiller => &*ALPHANUM_FILLER,
            FieldClass::Numeric => &*NUMERIC,
            FieldClass::NumericFiller => &*NUMERIC_FILLER,
            FieldClass::Latin => &*LATIN,
            FieldClass::AlphaNumeric => &*ALPHANUMERIC,
            FieldClass::Date => &*DATE,
        }
    }

    /// Returns true if the whole value belongs to this class.
    ///
    /// Empty values never match.
    pub fn matches(self, value: &str) -> bool {
        self.regex().is_match(value)
    }

    /// Short label used in violation messages.
    pub fn label(self) -> &'static str {
        match self {
            FieldClass::Alpha => "alpha",
            FieldClass::AlphaFiller => "alpha+<",
            FieldClass::AlphaNumFiller => "alpha+num+<",
            FieldClass::Numeric => "numeric",
            FieldClass::NumericFiller => "numeric+<",
            FieldClass::Latin => "Latin",
            FieldClass::AlphaNumeric => "alphanumeric",
            FieldClass::Date => "DDMMYYYY",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mrz_classes_reject_lower_case() {
        assert!(FieldClass::Alpha.matches("P"));
        assert!(!FieldClass::Alpha.matches("p"));
        assert!(!FieldClass::AlphaFiller.matches("d<<"));
        assert!(FieldClass::AlphaNumFiller.matches("T22000129"));
    }

    #[test]
    fn test_filler_only_in_filler_classes() {
        assert!(FieldClass::NumericFiller.matches("<"));
        assert!(!FieldClass::Numeric.matches("<"));
        assert!(!FieldClass::Alpha.matches("<"));
    }

    #[test]
    fn test_empty_never_matches() {
        for class in [
            FieldClass::Alpha,
            FieldClass::AlphaFiller,
            FieldClass::AlphaNumFiller,
            FieldClass::Numeric,
            FieldClass::NumericFiller,
            FieldClass::Latin,
            FieldClass::AlphaNumeric,
            FieldClass::Date,
        ] {
            assert!(!class.matches(""), "{:?} matched empty", class);
        }
    }

    #[test]
    fn test_date_requires_exactly_eight_digits() {
        assert!(FieldClass::Date.matches("12081983"));
        assert!(!FieldClass::Date.matches("1208198"));
        assert!(!FieldClass::Date.matches("120819833"));
        assert!(!FieldClass::Date.matches("12-08-83"));
    }

    #[test]
    fn test_no_trailing_newline_match() {
        assert!(!FieldClass::Numeric.matches("160\n"));
    }
}
