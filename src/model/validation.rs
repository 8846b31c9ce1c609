use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::fields::{Field, FieldErrors, PartialFields};

/// Minimum number of characters in a trimmed message.
pub const MIN_MESSAGE_CHARS: usize = 10;

/// Validation errors for contact form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your name.")]
    EmptyName,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please include at least 10 characters.")]
    MessageTooShort,
}

/// Deliberately loose: local part, `@`, domain, `.`, extension, no whitespace.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid hardcoded regex"));

/// Returns `true` if `email` looks like `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validates a single field value.
pub fn validate_field(field: Field, value: &str) -> Option<ValidationError> {
    match field {
        Field::Name if value.trim().is_empty() => Some(ValidationError::EmptyName),
        Field::Email if !is_valid_email(value) => Some(ValidationError::InvalidEmail),
        Field::Message if value.trim().chars().count() < MIN_MESSAGE_CHARS => {
            Some(ValidationError::MessageTooShort)
        }
        _ => None,
    }
}

/// Validates the fields present in `fields`; absent fields stay absent in the result.
pub fn validate(fields: &PartialFields<'_>) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for field in Field::ALL {
        if let Some(value) = fields.get(field) {
            errors.set(field, validate_field(field, value));
        }
    }
    errors
}
