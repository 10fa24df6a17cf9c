//! Identity document input and validation.
//!
//! Three input shapes are supported: manually entered fields, and the
//! machine-readable zone of ICAO 9303 Type 1 or Type 3 documents. Each is
//! validated against its grammar and turned into a [`CanonicalFields`]
//! sequence whose order is fixed per shape.

mod class;
mod fields;
mod manual;
mod mrz;

pub use class::FieldClass;
pub use fields::{strip_fillers, CanonicalFields, Field, FILLER};
pub use manual::ManualInput;
pub use mrz::{MrzFormat, MrzInput, Type1Mrz, Type3Mrz};

use crate::error::Result;

/// A document in one of the supported input shapes.
#[derive(Debug, Clone)]
pub enum DocumentInput {
    /// Fields typed in by hand.
    Manual(ManualInput),
    /// Machine-readable zone rows.
    Mrz(MrzInput),
}

impl DocumentInput {
    /// Validates the document and returns its canonical field sequence.
    pub fn canonical_fields(&self) -> Result<CanonicalFields> {
        match self {
            DocumentInput::Manual(input) => input.validate(),
            DocumentInput::Mrz(mrz) => mrz.validate(),
        }
    }

    /// Short name of the input shape, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            DocumentInput::Manual(_) => "manual",
            DocumentInput::Mrz(mrz) => match mrz.format() {
                MrzFormat::Type1 => "mrz-type1",
                MrzFormat::Type3 => "mrz-type3",
            },
        }
    }
}

impl From<ManualInput> for DocumentInput {
    fn from(input: ManualInput) -> Self {
        DocumentInput::Manual(input)
    }
}

impl From<MrzInput> for DocumentInput {
    fn from(mrz: MrzInput) -> Self {
        DocumentInput::Mrz(mrz)
    }
}

impl From<Type1Mrz> for DocumentInput {
    fn from(mrz: Type1Mrz) -> Self {
        DocumentInput::Mrz(MrzInput::Type1(mrz))
    }
}

impl From<Type3Mrz> for DocumentInput {
    fn from(mrz: Type3Mrz) -> Self {
        DocumentInput::Mrz(MrzInput::Type3(mrz))
    }
}
