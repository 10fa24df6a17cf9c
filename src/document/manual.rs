//! Validation of manually entered identity document fields.

use super::class::FieldClass;
use super::fields::CanonicalFields;
use crate::error::{IdentityError, Result, Violations};
use serde::Deserialize;

/// Rule applied to a manual field.
#[derive(Debug, Clone, Copy)]
enum Rule {
    Date,
    Latin,
    Numeric,
    AlphaNumeric,
}

impl Rule {
    fn check(self, field: &'static str, value: &str, violations: &mut Violations) {
        match self {
            Rule::Date => check_date(field, value, violations),
            Rule::Latin => {
                if !FieldClass::Latin.matches(value) {
                    violations.push(field, "must only contain Latin characters");
                }
            }
            Rule::Numeric => {
                if !FieldClass::Numeric.matches(value) {
                    violations.push(field, "must only contain numbers");
                }
            }
            Rule::AlphaNumeric => {
                if !FieldClass::AlphaNumeric.matches(value) {
                    violations.push(field, "must be a non-empty alphanumeric string");
                }
            }
        }
    }
}

/// Checks a `DDMMYYYY` date. The year is not range-checked.
fn check_date(field: &'static str, value: &str, violations: &mut Violations) {
    if !FieldClass::Date.matches(value) {
        violations.push(field, "must be in the format DDMMYYYY");
        return;
    }

    let digits = value.as_bytes();
    let day = (digits[0] - b'0') * 10 + (digits[1] - b'0');
    let month = (digits[2] - b'0') * 10 + (digits[3] - b'0');

    if !(1..=31).contains(&day) {
        violations.push(field, "day must be between 01 and 31");
    }
    if !(1..=12).contains(&month) {
        violations.push(field, "month must be between 01 and 12");
    }
}

/// Fields read from an identity document by hand.
///
/// Every field is optional, but at least one must be present. The
/// secret travels separately as a [`Secret`](crate::Secret).
///
/// Deserializes from the camelCase field names (`birthDate`, `docNum`, ...).
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ManualInput {
    /// Given names.
    pub names: Option<String>,
    /// Surname.
    pub surname: Option<String>,
    /// Date of birth, `DDMMYYYY`.
    pub birth_date: Option<String>,
    /// Date of expiry, `DDMMYYYY`.
    pub expire_date: Option<String>,
    /// Date of issue, `DDMMYYYY`.
    pub issue_date: Option<String>,
    /// Nationality.
    pub nationality: Option<String>,
    /// Sex.
    pub sex: Option<String>,
    /// Place of birth.
    pub birthplace: Option<String>,
    /// Place of origin.
    pub origin: Option<String>,
    /// Issuing authority.
    pub authority: Option<String>,
    /// Eye colour.
    pub eye_color: Option<String>,
    /// Hair colour.
    pub hair_color: Option<String>,
    /// Mother's given names.
    pub mother_names: Option<String>,
    /// Mother's surname.
    pub mother_surname: Option<String>,
    /// Father's given names.
    pub father_names: Option<String>,
    /// Father's surname.
    pub father_surname: Option<String>,
    /// Height.
    pub height: Option<String>,
    /// Weight.
    pub weight: Option<String>,
    /// Document number.
    pub doc_num: Option<String>,
    /// Address.
    pub address: Option<String>,
    /// Miscellaneous field 1.
    pub misc1: Option<String>,
    /// Miscellaneous field 2.
    pub misc2: Option<String>,
    /// Miscellaneous field 3.
    pub misc3: Option<String>,
}

impl ManualInput {
    /// Fields in canonical order, with the rule each must satisfy.
    fn slots(&self) -> [(&'static str, Option<&str>, Rule); 23] {
        [
            ("names", self.names.as_deref(), Rule::Latin),
            ("surname", self.surname.as_deref(), Rule::Latin),
            ("birthDate", self.birth_date.as_deref(), Rule::Date),
            ("expireDate", self.expire_date.as_deref(), Rule::Date),
            ("issueDate", self.issue_date.as_deref(), Rule::Date),
            ("nationality", self.nationality.as_deref(), Rule::Latin),
            ("sex", self.sex.as_deref(), Rule::Latin),
            ("birthplace", self.birthplace.as_deref(), Rule::Latin),
            ("origin", self.origin.as_deref(), Rule::Latin),
            ("authority", self.authority.as_deref(), Rule::Latin),
            ("eyeColor", self.eye_color.as_deref(), Rule::Latin),
            ("hairColor", self.hair_color.as_deref(), Rule::Latin),
            ("motherNames", self.mother_names.as_deref(), Rule::Latin),
            ("motherSurname", self.mother_surname.as_deref(), Rule::Latin),
            ("fatherNames", self.father_names.as_deref(), Rule::Latin),
            ("fatherSurname", self.father_surname.as_deref(), Rule::Latin),
            ("height", self.height.as_deref(), Rule::Numeric),
            ("weight", self.weight.as_deref(), Rule::Numeric),
            ("docNum", self.doc_num.as_deref(), Rule::AlphaNumeric),
            ("address", self.address.as_deref(), Rule::AlphaNumeric),
            ("misc1", self.misc1.as_deref(), Rule::AlphaNumeric),
            ("misc2", self.misc2.as_deref(), Rule::AlphaNumeric),
            ("misc3", self.misc3.as_deref(), Rule::AlphaNumeric),
        ]
    }

    /// Returns true if no field is present.
    pub fn is_empty(&self) -> bool {
        self.slots().iter().all(|(_, value, _)| value.is_none())
    }

    /// Validates every present field and returns them in canonical order.
    ///
    /// All violations are collected before failing, in canonical field
    /// order, so a caller can correct everything in one pass.
    pub fn validate(&self) -> Result<CanonicalFields> {
        let mut violations = Violations::new();
        let mut fields = CanonicalFields::new();

        for (name, value, rule) in self.slots() {
            let Some(value) = value else { continue };
            rule.check(name, value, &mut violations);
            fields.push(name, value.to_owned());
        }

        violations.into_result()?;

        if fields.is_empty() {
            return Err(IdentityError::InsufficientFields);
        }

        tracing::debug!(fields = fields.len(), "Validated manual input");

        Ok(fields)
    }
}

impl std::fmt::Debug for ManualInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let present: Vec<&str> = self
            .slots()
            .iter()
            .filter(|(_, value, _)| value.is_some())
            .map(|(name, _, _)| *name)
            .collect();
        f.debug_struct("ManualInput")
            .field("present", &present)
            .finish_non_exhaustive()
    }
}
