//! ICAO 9303 Type 3 layout: two rows of 44 characters.

use super::{check_slots, check_width, MrzFormat, Slot};
use crate::document::class::FieldClass::{
    Alpha, AlphaFiller, AlphaNumFiller, Numeric, NumericFiller,
};
use crate::document::fields::CanonicalFields;
use crate::error::{Result, Violations};
use serde::Deserialize;

/// Positional slots of both rows, in extraction order.
const SLOTS: [Slot; 15] = [
    Slot::new("passportType", 0, 0..1, Alpha),
    Slot::new("type", 0, 1..2, AlphaFiller),
    Slot::new("issuingCountry", 0, 2..5, AlphaFiller),
    // Surname and given names; extracted as one value with fillers removed.
    Slot::new("namePart", 0, 5..44, AlphaFiller),
    Slot::new("passportNumber", 1, 0..9, AlphaNumFiller),
    Slot::new("passportNumberCheckDigit", 1, 9..10, Numeric),
    Slot::new("nationality", 1, 10..13, AlphaFiller),
    Slot::new("birthDate", 1, 13..19, Numeric),
    Slot::new("birthDateCheckDigit", 1, 19..20, Numeric),
    Slot::new("sex", 1, 20..21, AlphaFiller),
    Slot::new("expirationDate", 1, 21..27, Numeric),
    Slot::new("expirationDateCheckDigit", 1, 27..28, Numeric),
    Slot::new("personalNumber", 1, 28..42, AlphaNumFiller),
    Slot::new("personalNumberCheckDigit", 1, 42..43, NumericFiller),
    Slot::new("finalCheckDigit", 1, 43..44, Numeric),
];

/// Machine-readable zone of an ICAO 9303 Type 3 (passport) document.
#[derive(Clone, Deserialize)]
pub struct Type3Mrz {
    /// First row: document code, issuer, names.
    pub row1: String,
    /// Second row: passport number, nationality, dates, personal number.
    pub row2: String,
}

impl Type3Mrz {
    /// Creates a Type 3 MRZ from its two rows.
    pub fn new(row1: impl Into<String>, row2: impl Into<String>) -> Self {
        Self {
            row1: row1.into(),
            row2: row2.into(),
        }
    }

    /// Validates every slot and extracts the filler-stripped fields.
    ///
    /// Fails with a length error, before any grammar check, if a row is not
    /// exactly 44 characters.
    pub fn validate(&self) -> Result<CanonicalFields> {
        let rows = check_width(MrzFormat::Type3, &[self.row1.as_str(), self.row2.as_str()])?;

        let mut violations = Violations::new();
        check_slots(&rows, &SLOTS, &mut violations);
        violations.into_result()?;

        let mut fields = CanonicalFields::new();
        for slot in &SLOTS {
            fields.push(slot.name, slot.extract(&rows));
        }

        tracing::debug!(
            format = %MrzFormat::Type3,
            fields = fields.len(),
            "Validated MRZ"
        );

        Ok(fields)
    }
}

impl std::fmt::Debug for Type3Mrz {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Type3Mrz").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{IdentityError, LengthMismatch};

    fn erika() -> Type3Mrz {
        Type3Mrz::new(
            "P<D<<MUSTERMANN<<ERIKA<<<<<<<<<<<<<<<<<<<<<<",
            "C01X00T478D<<6408125F2702283<<<<<<<<<<<<<<<4",
        )
    }

    #[test]
    fn test_deserialize_rows() {
        let mrz: Type3Mrz = toml::from_str(
            r#"
            row1 = "P<D<<MUSTERMANN<<ERIKA<<<<<<<<<<<<<<<<<<<<<<"
            row2 = "C01X00T478D<<6408125F2702283<<<<<<<<<<<<<<<4"
            "#,
        )
        .unwrap();
        assert_eq!(mrz.validate().unwrap().values(), erika().validate().unwrap().values());
    }

    #[test]
    fn test_extracts_german_passport() {
        let fields = erika().validate().unwrap();
        assert_eq!(
            fields.values(),
            vec![
                "P",
                "D",
                "MUSTERMANNERIKA",
                "C01X00T47",
                "8",
                "D",
                "640812",
                "5",
                "F",
                "270228",
                "3",
                "4"
            ]
        );
        assert_eq!(fields.get("type"), None);
        assert_eq!(fields.get("personalNumberCheckDigit"), None);
    }

    #[test]
    fn test_row_width_enforced() {
        let mut mrz = erika();
        mrz.row1.push('<');
        assert!(matches!(
            mrz.validate(),
            Err(IdentityError::Length(LengthMismatch::RowWidth {
                row: 1,
                expected: 44,
                found: 45,
                ..
            }))
        ));
    }

    #[test]
    fn test_digit_in_name_rejected() {
        let mut mrz = erika();
        mrz.row1.replace_range(10..11, "0");

        match mrz.validate() {
            Err(IdentityError::Grammar(violations)) => {
                assert_eq!(violations.fields(), vec!["namePart"]);
                assert!(violations.to_string().contains("row 1 positions 6-44"));
            }
            other => panic!("expected grammar error, got {:?}", other),
        }
    }

    #[test]
    fn test_personal_number_check_digit_accepts_filler_or_digit() {
        let mut mrz = erika();
        mrz.row2.replace_range(42..43, "7");
        let fields = mrz.validate().unwrap();
        assert_eq!(fields.get("personalNumberCheckDigit"), Some("7"));

        mrz.row2.replace_range(42..43, "A");
        assert!(matches!(mrz.validate(), Err(IdentityError::Grammar(_))));
    }

    #[test]
    fn test_lower_case_rejected() {
        let mrz = Type3Mrz::new(
            "p<d<<mustermann<<erika<<<<<<<<<<<<<<<<<<<<<<",
            "C01X00T478D<<6408125F2702283<<<<<<<<<<<<<<<4",
        );

        match mrz.validate() {
            Err(IdentityError::Grammar(violations)) => {
                assert_eq!(
                    violations.fields(),
                    vec!["passportType", "issuingCountry", "namePart"]
                );
            }
            other => panic!("expected grammar error, got {:?}", other),
        }
    }
}
