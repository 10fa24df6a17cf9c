//! ICAO 9303 Type 1 layout: three rows of 30 characters.

use super::{check_slots, check_width, MrzFormat, Slot};
use crate::document::class::FieldClass::{
    Alpha, AlphaFiller, AlphaNumFiller, Numeric, NumericFiller,
};
use crate::document::fields::{strip_fillers, CanonicalFields};
use crate::error::{Result, Violations};
use serde::Deserialize;

/// Separator between surname and given names in the name row.
const NAME_SEPARATOR: &str = "<<";

/// Positional slots of rows 1 and 2, in extraction order.
const SLOTS: [Slot; 14] = [
    Slot::new("documentType", 0, 0..1, Alpha),
    // `V` in this position would collide with visa document codes.
    Slot::new("type", 0, 1..2, AlphaNumFiller).forbid("V"),
    Slot::new("issuingCountry", 0, 2..5, AlphaFiller),
    Slot::new("documentNumber", 0, 5..14, AlphaNumFiller),
    Slot::new("documentNumberCheckDigit", 0, 14..15, NumericFiller),
    Slot::new("optionalData1", 0, 15..30, AlphaNumFiller),
    Slot::new("birthDate", 1, 0..6, Numeric),
    Slot::new("birthDateCheckDigit", 1, 6..7, Numeric),
    Slot::new("sex", 1, 7..8, AlphaFiller),
    Slot::new("expirationDate", 1, 8..14, Numeric),
    Slot::new("expirationDateCheckDigit", 1, 14..15, Numeric),
    Slot::new("nationality", 1, 15..18, AlphaFiller),
    Slot::new("optionalData2", 1, 18..29, AlphaNumFiller),
    Slot::new("finalCheckDigit", 1, 29..30, Numeric),
];

/// Row 3: `SURNAME<<GIVEN<NAMES<<<...`.
const NAME_SLOT: Slot = Slot::new("names", 2, 0..30, AlphaFiller);

/// Machine-readable zone of an ICAO 9303 Type 1 document.
#[derive(Clone, Deserialize)]
pub struct Type1Mrz {
    /// First row: document code, issuer, document number, optional data.
    pub row1: String,
    /// Second row: birth date, sex, expiry, nationality, optional data.
    pub row2: String,
    /// Third row: surname and given names.
    pub row3: String,
}

impl Type1Mrz {
    /// Creates a Type 1 MRZ from its three rows.
    pub fn new(row1: impl Into<String>, row2: impl Into<String>, row3: impl Into<String>) -> Self {
        Self {
            row1: row1.into(),
            row2: row2.into(),
            row3: row3.into(),
        }
    }

    /// Validates every slot and extracts the filler-stripped fields.
    ///
    /// Fails with a length error, before any grammar check, if a row is not
    /// exactly 30 characters.
    pub fn validate(&self) -> Result<CanonicalFields> {
        let rows = check_width(
            MrzFormat::Type1,
            &[self.row1.as_str(), self.row2.as_str(), self.row3.as_str()],
        )?;

        let mut violations = Violations::new();
        check_slots(&rows, &SLOTS, &mut violations);
        check_slots(&rows, std::slice::from_ref(&NAME_SLOT), &mut violations);
        violations.into_result()?;

        let mut fields = CanonicalFields::new();
        for slot in &SLOTS {
            fields.push(slot.name, slot.extract(&rows));
        }

        let names = rows[NAME_SLOT.row].as_string();
        let mut parts = names.split(NAME_SEPARATOR);
        fields.push("surname", strip_fillers(parts.next().unwrap_or_default()));
        fields.push("givenNames", strip_fillers(parts.next().unwrap_or_default()));

        tracing::debug!(
            format = %MrzFormat::Type1,
            fields = fields.len(),
            "Validated MRZ"
        );

        Ok(fields)
    }
}

impl std::fmt::Debug for Type1Mrz {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Type1Mrz").finish_non_exhaustive()
    }
}
