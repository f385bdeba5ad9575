//! Field classification and the field-level error taxonomy.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::NonEmptyString;

/// How a field's value is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Email,
    Phone,
    PersonName,
    Message,
    Checkbox,
    #[default]
    Generic,
}

impl FieldKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::PersonName => "person-name",
            Self::Message => "message",
            Self::Checkbox => "checkbox",
            Self::Generic => "generic",
        }
    }

    /// Classify an input from its markup: the `type` attribute wins for
    /// email, tel and checkbox inputs, then well-known ids select the name
    /// and message rules.
    #[must_use]
    pub fn classify(input_type: &str, id: &str) -> Self {
        match input_type.trim().to_ascii_lowercase().as_str() {
            "email" => return Self::Email,
            "tel" => return Self::Phone,
            "checkbox" => return Self::Checkbox,
            _ => {}
        }
        match id.trim() {
            "firstName" | "lastName" | "name" => Self::PersonName,
            "message" => Self::Message,
            _ => Self::Generic,
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "email" => Some(Self::Email),
            "phone" | "tel" => Some(Self::Phone),
            "person-name" | "name" => Some(Self::PersonName),
            "message" | "free-text-message" => Some(Self::Message),
            "checkbox" | "consent" => Some(Self::Checkbox),
            "generic" | "text" => Some(Self::Generic),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a field was rejected. Every variant is recoverable and rendered inline
/// next to the field; none of them escalates past the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("required field is empty")]
    MissingRequired,
    #[error("value does not satisfy the {0} rule")]
    PatternMismatch(FieldKind),
    #[error("consent checkbox is not checked")]
    ConsentMissing,
}

/// A rejected field together with the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Invalid {
    pub error: FieldError,
    pub message: NonEmptyString,
}

impl Invalid {
    #[must_use]
    pub fn new(error: FieldError, message: NonEmptyString) -> Self {
        Self { error, message }
    }
}

/// Result of checking a single field.
pub type Validation = Result<(), Invalid>;
