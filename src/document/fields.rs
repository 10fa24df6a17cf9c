//! Canonical field sequence produced by the validators.

use zeroize::Zeroize;

/// The MRZ filler character.
pub const FILLER: char = '<';

/// Removes filler characters and whitespace from a field.
///
/// Idempotent: stripping an already stripped value returns it unchanged.
pub fn strip_fillers(value: &str) -> String {
    value
        .chars()
        .filter(|&c| c != FILLER && !c.is_whitespace())
        .collect()
}

/// A named, non-empty field value.
pub struct Field {
    name: &'static str,
    value: String,
}

impl Field {
    /// Returns the field name (e.g. `birthDate`, `documentNumber`).
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the field value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Ordered sequence of validated, non-empty field values.
///
/// Order is fixed per input type and is consumed verbatim by the
/// derivation, so two equal documents always yield equal sequences.
/// Values are wiped from memory when the sequence is dropped.
#[derive(Default)]
pub struct CanonicalFields {
    entries: Vec<Field>,
}

impl CanonicalFields {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, skipping it if the value is empty.
    pub fn push(&mut self, name: &'static str, value: String) {
        if !value.is_empty() {
            self.entries.push(Field { name, value });
        }
    }

    /// Returns the number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no field survived validation.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.entries.iter()
    }

    /// Returns the values in canonical order.
    pub fn values(&self) -> Vec<&str> {
        self.entries.iter().map(|f| f.value.as_str()).collect()
    }

    /// Returns the field names in canonical order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|f| f.name).collect()
    }

    /// Looks up a value by field name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Concatenates all values in canonical order.
    pub fn concat(&self) -> String {
        self.entries.iter().map(|f| f.value.as_str()).collect()
    }
}

impl Drop for CanonicalFields {
    fn drop(&mut self) {
        for field in &mut self.entries {
            field.value.zeroize();
        }
    }
}

impl std::fmt::Debug for CanonicalFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanonicalFields")
            .field("names", &self.names())
            .finish_non_exhaustive()
    }
}
