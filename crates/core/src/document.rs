//! National document number (CPF) value object.
//!
//! Accepted as exactly 11 ASCII digits and stored that way. Rendered for
//! display as `NNN.NNN.NNN-NN`. Check digits are not verified.

use serde::{Serialize, Serializer};

use crate::error::CoreError;

/// Number of digits in a document number.
pub const DOCUMENT_NUMBER_LEN: usize = 11;

/// A syntactically valid document number (digits only).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentNumber(String);

impl DocumentNumber {
    /// Parse an unformatted document number.
    ///
    /// Rejects anything that is not exactly 11 ASCII digits, including the
    /// formatted `123.456.789-01` form.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.len() != DOCUMENT_NUMBER_LEN || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::Validation(format!(
                "Document number must contain exactly {DOCUMENT_NUMBER_LEN} numeric digits"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    /// The raw digits, as stored.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form: `123.456.789-01`.
    pub fn formatted(&self) -> String {
        let d = &self.0;
        format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
    }
}

impl std::fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.formatted())
    }
}

/// Serializes in display form; input is always taken unformatted.
impl Serialize for DocumentNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.formatted())
    }
}
