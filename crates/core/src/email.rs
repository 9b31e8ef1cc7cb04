//! Email address value object.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::CoreError;

/// Accepted address shape: `local@domain.tld` with a 2+ letter TLD.
pub const EMAIL_PATTERN: &str = r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// A syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Parse an email address. The input is not trimmed or lowercased.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if !EMAIL_RE.is_match(raw) {
            return Err(CoreError::Validation(format!("Invalid email format: '{raw}'")));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Email {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
