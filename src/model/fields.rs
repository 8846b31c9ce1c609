use std::fmt;

use serde::{Deserialize, Serialize};

use super::validation::ValidationError;

/// One of the three user-facing inputs of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    /// All fields in display order.
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    /// Label shown above the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Message => "Message",
        }
    }

    /// Hint text rendered while the input is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Your name",
            Self::Email => "you@example.com",
            Self::Message => "Tell me about your administrative support needs…",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current values of the form inputs.
///
/// Also the on-disk shape of a draft: `{"name": .., "email": .., "message": ..}`.
/// Keys missing from a stored draft deserialize as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormFields {
    /// Creates a set of fields from owned values.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Returns the value of `field`.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    /// Replaces the value of `field`.
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Message => self.message = value,
        }
    }

    /// Blanks every field.
    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }

    /// Returns `true` if every field is empty.
    pub fn is_blank(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}

/// A subset of form values to validate.
///
/// Absent fields are skipped by [`validate`](super::validate) and stay absent
/// in its result, which is what per-field revalidation relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartialFields<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub message: Option<&'a str>,
}

impl<'a> PartialFields<'a> {
    /// A partial set containing just `field`.
    pub fn only(field: Field, value: &'a str) -> Self {
        let mut partial = Self::default();
        match field {
            Field::Name => partial.name = Some(value),
            Field::Email => partial.email = Some(value),
            Field::Message => partial.message = Some(value),
        }
        partial
    }

    /// Returns the value of `field`, if present.
    pub fn get(&self, field: Field) -> Option<&'a str> {
        match field {
            Field::Name => self.name,
            Field::Email => self.email,
            Field::Message => self.message,
        }
    }
}

impl<'a> From<&'a FormFields> for PartialFields<'a> {
    fn from(fields: &'a FormFields) -> Self {
        Self {
            name: Some(&fields.name),
            email: Some(&fields.email),
            message: Some(&fields.message),
        }
    }
}

/// Per-field validation results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors {
    name: Option<ValidationError>,
    email: Option<ValidationError>,
    message: Option<ValidationError>,
}

impl FieldErrors {
    /// Returns the error for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        match field {
            Field::Name => self.name.as_ref(),
            Field::Email => self.email.as_ref(),
            Field::Message => self.message.as_ref(),
        }
    }

    /// Sets or clears the error for `field`.
    pub fn set(&mut self, field: Field, error: Option<ValidationError>) {
        match field {
            Field::Name => self.name = error,
            Field::Email => self.email = error,
            Field::Message => self.message = error,
        }
    }

    /// Returns `true` if no field has an error.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Number of fields with an error.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Iterates over `(field, error)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &ValidationError)> {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|e| (field, e)))
    }
}

/// Which fields the user has interacted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Touched {
    name: bool,
    email: bool,
    message: bool,
}

impl Touched {
    pub fn get(&self, field: Field) -> bool {
        match field {
            Field::Name => self.name,
            Field::Email => self.email,
            Field::Message => self.message,
        }
    }

    pub fn mark(&mut self, field: Field) {
        match field {
            Field::Name => self.name = true,
            Field::Email => self.email = true,
            Field::Message => self.message = true,
        }
    }

    pub fn mark_all(&mut self) {
        for field in Field::ALL {
            self.mark(field);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
