//! Single-field validation.

use tracing::debug;

use formgate_types::{FieldError, FieldKind, Invalid, Validation};

use crate::host::FieldElement;
use crate::rules::RuleSet;

/// Check a trimmed value without touching any UI state.
pub fn check_value(
    value: &str,
    kind: FieldKind,
    required: bool,
    checked: bool,
    rules: &RuleSet,
) -> Result<(), FieldError> {
    if value.is_empty() {
        return if required {
            Err(FieldError::MissingRequired)
        } else {
            Ok(())
        };
    }

    let Some(rule) = rules.rule(kind) else {
        return Ok(());
    };
    match kind {
        // An optional checkbox may stay unchecked.
        FieldKind::Checkbox if required && !rule.accepts(value, checked) => {
            Err(FieldError::ConsentMissing)
        }
        FieldKind::Checkbox => Ok(()),
        _ if !rule.accepts(value, checked) => Err(FieldError::PatternMismatch(kind)),
        _ => Ok(()),
    }
}

/// Validate one element and render the outcome on it.
///
/// The previous error is always cleared first, so calling this twice on an
/// unchanged field leaves the same visible state and returns the same result.
pub fn validate_field(element: &mut dyn FieldElement, rules: &RuleSet) -> Validation {
    let raw = element.value();
    let value = raw.trim();
    element.set_error_state(None);

    let outcome = check_value(
        value,
        element.kind(),
        element.is_required(),
        element.is_checked(),
        rules,
    )
    .map_err(|error| Invalid::new(error, rules.message_for(error).clone()));

    if let Err(invalid) = &outcome {
        element.set_error_state(Some(invalid.message.as_str()));
    }
    outcome
}

/// Last known validity of a field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldStatus {
    /// Never validated; no error is shown.
    #[default]
    Pristine,
    Valid,
    Invalid(Invalid),
}

/// A form field: the host element plus its validity.
///
/// Status and the rendered error move together; nothing else writes to the
/// element's error state.
pub struct Field {
    element: Box<dyn FieldElement>,
    status: FieldStatus,
}

impl Field {
    #[must_use]
    pub fn new(element: Box<dyn FieldElement>) -> Self {
        Self {
            element,
            status: FieldStatus::Pristine,
        }
    }

    #[must_use]
    pub fn status(&self) -> &FieldStatus {
        &self.status
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.element.kind()
    }

    /// Whether the field currently shows an error.
    #[must_use]
    pub fn is_marked_invalid(&self) -> bool {
        matches!(self.status, FieldStatus::Invalid(_))
    }

    pub fn validate(&mut self, rules: &RuleSet) -> Validation {
        let outcome = validate_field(self.element.as_mut(), rules);
        self.status = match &outcome {
            Ok(()) => FieldStatus::Valid,
            Err(invalid) => FieldStatus::Invalid(invalid.clone()),
        };
        debug!(kind = %self.element.kind(), valid = outcome.is_ok(), "field validated");
        outcome
    }

    /// Remove any rendered error and forget the last result.
    pub fn reset(&mut self) {
        self.element.set_error_state(None);
        self.status = FieldStatus::Pristine;
    }
}
