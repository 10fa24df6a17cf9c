//! ICAO 9303 machine-readable zone validation and extraction.
//!
//! Rows are fixed-width positional records. Each layout declares its
//! slots as named ranges with a character class; validation checks every
//! slot and reports all violations together, extraction strips filler
//! from each slot in declaration order.

mod type1;
mod type3;

pub use type1::Type1Mrz;
pub use type3::Type3Mrz;

use super::class::FieldClass;
use super::fields::CanonicalFields;
use crate::error::{LengthMismatch, Result, Violations};
use std::fmt;
use std::ops::Range;

/// Supported MRZ layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MrzFormat {
    /// Three rows of 30 characters (identity cards).
    Type1,
    /// Two rows of 44 characters (passports).
    Type3,
}

impl MrzFormat {
    /// Number of rows in the layout.
    pub fn rows(self) -> usize {
        match self {
            MrzFormat::Type1 => 3,
            MrzFormat::Type3 => 2,
        }
    }

    /// Width of every row in the layout.
    pub fn width(self) -> usize {
        match self {
            MrzFormat::Type1 => 30,
            MrzFormat::Type3 => 44,
        }
    }
}

impl fmt::Display for MrzFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MrzFormat::Type1 => f.write_str("Type 1"),
            MrzFormat::Type3 => f.write_str("Type 3"),
        }
    }
}

/// MRZ rows of either supported layout.
#[derive(Clone)]
pub enum MrzInput {
    /// Three-row layout.
    Type1(Type1Mrz),
    /// Two-row layout.
    Type3(Type3Mrz),
}

impl MrzInput {
    /// Selects the layout from the number of rows.
    ///
    /// Three rows select Type 1 and two rows select Type 3; row widths are
    /// checked later by [`validate`](Self::validate).
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        match rows {
            [row1, row2, row3] => Ok(MrzInput::Type1(Type1Mrz::new(
                row1.as_ref(),
                row2.as_ref(),
                row3.as_ref(),
            ))),
            [row1, row2] => Ok(MrzInput::Type3(Type3Mrz::new(row1.as_ref(), row2.as_ref()))),
            _ => Err(LengthMismatch::RowCount(rows.len()).into()),
        }
    }

    /// Returns the layout of these rows.
    pub fn format(&self) -> MrzFormat {
        match self {
            MrzInput::Type1(_) => MrzFormat::Type1,
            MrzInput::Type3(_) => MrzFormat::Type3,
        }
    }

    /// Validates the rows against their layout and extracts the fields.
    pub fn validate(&self) -> Result<CanonicalFields> {
        match self {
            MrzInput::Type1(mrz) => mrz.validate(),
            MrzInput::Type3(mrz) => mrz.validate(),
        }
    }
}

impl fmt::Debug for MrzInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = self.format();
        f.debug_struct("MrzInput")
            .field("format", &format)
            .field("rows", &format.rows())
            .finish_non_exhaustive()
    }
}

/// One MRZ row as characters, so slicing never splits a code point.
pub(crate) struct Row(Vec<char>);

impl Row {
    pub(crate) fn slice(&self, range: Range<usize>) -> String {
        self.0[range].iter().collect()
    }

    pub(crate) fn as_string(&self) -> String {
        self.0.iter().collect()
    }
}

/// Checks row widths before any grammar rule runs.
pub(crate) fn check_width(format: MrzFormat, rows: &[&str]) -> Result<Vec<Row>> {
    let expected = format.width();

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let chars: Vec<char> = row.chars().collect();
            if chars.len() == expected {
                Ok(Row(chars))
            } else {
                Err(LengthMismatch::RowWidth {
                    format,
                    row: i + 1,
                    expected,
                    found: chars.len(),
                }
                .into())
            }
        })
        .collect()
}

/// A named positional slot within a row.
pub(crate) struct Slot {
    pub(crate) name: &'static str,
    pub(crate) row: usize,
    pub(crate) range: Range<usize>,
    pub(crate) class: FieldClass,
    /// Value rejected even though it matches the class.
    pub(crate) forbidden: Option<&'static str>,
}

impl Slot {
    pub(crate) const fn new(
        name: &'static str,
        row: usize,
        range: Range<usize>,
        class: FieldClass,
    ) -> Self {
        Self {
            name,
            row,
            range,
            class,
            forbidden: None,
        }
    }

    pub(crate) const fn forbid(mut self, value: &'static str) -> Self {
        self.forbidden = Some(value);
        self
    }

    /// Human-readable, 1-based position of the slot.
    fn position(&self) -> String {
        let Range { start, end } = self.range;
        if end - start == 1 {
            format!("row {} position {}", self.row + 1, start + 1)
        } else {
            format!("row {} positions {}-{}", self.row + 1, start + 1, end)
        }
    }

    fn check(&self, rows: &[Row], violations: &mut Violations) {
        let value = rows[self.row].slice(self.range.clone());

        if !self.class.matches(&value) {
            violations.push(
                self.name,
                format!("at {} must be '{}' characters", self.position(), self.class.label()),
            );
        }
        if self.forbidden == Some(value.as_str()) {
            violations.push(
                self.name,
                format!("at {} cannot be '{}'", self.position(), value),
            );
        }
    }

    pub(crate) fn extract(&self, rows: &[Row]) -> String {
        super::fields::strip_fillers(&rows[self.row].slice(self.range.clone()))
    }
}

/// Checks every slot, collecting all violations in slot order.
pub(crate) fn check_slots(rows: &[Row], slots: &[Slot], violations: &mut Violations) {
    for slot in slots {
        slot.check(rows, violations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IdentityError;

    #[test]
    fn test_three_rows_select_type1() {
        let mrz = MrzInput::from_rows(&["a", "b", "c"]).unwrap();
        assert_eq!(mrz.format(), MrzFormat::Type1);
        assert_eq!(mrz.format().rows(), 3);
    }

    #[test]
    fn test_two_rows_select_type3() {
        let mrz = MrzInput::from_rows(&["a", "b"]).unwrap();
        assert_eq!(mrz.format(), MrzFormat::Type3);
        assert_eq!(mrz.format().rows(), 2);
    }

    #[test]
    fn test_other_row_counts_rejected() {
        for rows in [vec![], vec!["a"], vec!["a", "b", "c", "d"]] {
            assert!(matches!(
                MrzInput::from_rows(&rows),
                Err(IdentityError::Length(LengthMismatch::RowCount(_)))
            ));
        }
    }

    #[test]
    fn test_width_counts_characters_not_bytes() {
        let row = "Ä".repeat(30);
        let rows = check_width(MrzFormat::Type1, &[row.as_str()]).unwrap();
        assert_eq!(rows[0].slice(0..2), "ÄÄ");
    }

    #[test]
    fn test_width_reports_first_bad_row() {
        let good = "<".repeat(44);
        let bad = "<".repeat(43);
        match check_width(MrzFormat::Type3, &[good.as_str(), bad.as_str()]) {
            Err(IdentityError::Length(LengthMismatch::RowWidth { row, found, .. })) => {
                assert_eq!(row, 2);
                assert_eq!(found, 43);
            }
            _ => panic!("expected row width error"),
        }
    }

    #[test]
    fn test_slot_position_labels() {
        let single = Slot::new("sex", 1, 7..8, FieldClass::AlphaFiller);
        let range = Slot::new("birthDate", 1, 0..6, FieldClass::Numeric);
        assert_eq!(single.position(), "row 2 position 8");
        assert_eq!(range.position(), "row 2 positions 1-6");
    }
}
