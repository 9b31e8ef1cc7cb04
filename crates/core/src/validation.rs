//! Field validators for request DTOs (`#[validate(custom(function = ...))]`).
//!
//! Each validator delegates to the matching domain constructor so request
//! validation and domain rules cannot disagree.

use std::borrow::Cow;

use validator::ValidationError;

use crate::document::DocumentNumber;
use crate::email::Email;

fn invalid(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

/// Rejects empty or whitespace-only text.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("blank", "must not be blank".to_string()));
    }
    Ok(())
}

/// Requires exactly 11 ASCII digits.
pub fn validate_document_number(value: &str) -> Result<(), ValidationError> {
    DocumentNumber::parse(value).map(|_| ()).map_err(|_| {
        invalid(
            "document_number",
            "must contain exactly 11 numeric digits".to_string(),
        )
    })
}

/// Requires a `local@domain.tld` address.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    Email::parse(value)
        .map(|_| ())
        .map_err(|_| invalid("email", "invalid email format".to_string()))
}
