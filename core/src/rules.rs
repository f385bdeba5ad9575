//! The validation rule table.
//!
//! Built once from a [`Messages`] catalogue and shared read-only by every
//! validator (`Arc<RuleSet>`). Rules follow the documented intent of each
//! classification rather than any particular legacy pattern text.

use regex::Regex;
use thiserror::Error;

use formgate_types::{FieldError, FieldKind, Messages, NonEmptyString};

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const PHONE_PATTERN: &str = r"^[0-9+\-() ]{10,20}$";
const PERSON_NAME_PATTERN: &str = r"^[\p{L} '\-]{2,50}$";
const MESSAGE_MIN_CHARS: usize = 10;

#[derive(Debug, Error)]
#[error("invalid built-in pattern for {kind}: {source}")]
pub struct RuleSetError {
    kind: FieldKind,
    #[source]
    source: regex::Error,
}

/// How a rule decides whether a trimmed value matches.
#[derive(Debug, Clone)]
pub enum Matcher {
    Pattern(Regex),
    MinChars(usize),
    /// Checkbox state only; the value text is never inspected.
    Checked,
}

#[derive(Debug, Clone)]
pub struct ValidationRule {
    matcher: Matcher,
    message: NonEmptyString,
}

impl ValidationRule {
    #[must_use]
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    #[must_use]
    pub fn message(&self) -> &NonEmptyString {
        &self.message
    }

    /// Apply the rule to a trimmed value. Checkbox rules only look at `checked`.
    #[must_use]
    pub fn accepts(&self, value: &str, checked: bool) -> bool {
        match &self.matcher {
            Matcher::Pattern(pattern) => pattern.is_match(value),
            Matcher::MinChars(min) => value.chars().count() >= *min,
            Matcher::Checked => checked,
        }
    }
}

/// Immutable classification → rule table plus the shared "required" message.
#[derive(Debug, Clone)]
pub struct RuleSet {
    email: ValidationRule,
    phone: ValidationRule,
    person_name: ValidationRule,
    message: ValidationRule,
    consent: ValidationRule,
    required: NonEmptyString,
}

fn compile(kind: FieldKind, pattern: &str) -> Result<Matcher, RuleSetError> {
    Regex::new(pattern)
        .map(Matcher::Pattern)
        .map_err(|source| RuleSetError { kind, source })
}

impl RuleSet {
    pub fn new(messages: &Messages) -> Result<Self, RuleSetError> {
        Ok(Self {
            email: ValidationRule {
                matcher: compile(FieldKind::Email, EMAIL_PATTERN)?,
                message: messages.invalid_email.clone(),
            },
            phone: ValidationRule {
                matcher: compile(FieldKind::Phone, PHONE_PATTERN)?,
                message: messages.invalid_phone.clone(),
            },
            person_name: ValidationRule {
                matcher: compile(FieldKind::PersonName, PERSON_NAME_PATTERN)?,
                message: messages.invalid_name.clone(),
            },
            message: ValidationRule {
                matcher: Matcher::MinChars(MESSAGE_MIN_CHARS),
                message: messages.short_message.clone(),
            },
            consent: ValidationRule {
                matcher: Matcher::Checked,
                message: messages.consent_required.clone(),
            },
            required: messages.required.clone(),
        })
    }

    /// Rule for a classification. Generic fields have none: only the
    /// required check applies to them.
    #[must_use]
    pub fn rule(&self, kind: FieldKind) -> Option<&ValidationRule> {
        match kind {
            FieldKind::Email => Some(&self.email),
            FieldKind::Phone => Some(&self.phone),
            FieldKind::PersonName => Some(&self.person_name),
            FieldKind::Message => Some(&self.message),
            FieldKind::Checkbox => Some(&self.consent),
            FieldKind::Generic => None,
        }
    }

    #[must_use]
    pub fn required_message(&self) -> &NonEmptyString {
        &self.required
    }

    /// Message shown for a given rejection.
    #[must_use]
    pub fn message_for(&self, error: FieldError) -> &NonEmptyString {
        match error {
            FieldError::MissingRequired => &self.required,
            FieldError::ConsentMissing => &self.consent.message,
            FieldError::PatternMismatch(kind) => self
                .rule(kind)
                .map_or(&self.required, ValidationRule::message),
        }
    }
}
