//! Capabilities the form consumes from its host page.
//!
//! The validator and controller depend only on these traits, never on a
//! concrete UI toolkit.

use formgate_types::{FieldKind, Severity};

/// A named input as seen by the validator.
pub trait FieldElement {
    /// Raw, untrimmed value.
    fn value(&self) -> String;
    fn kind(&self) -> FieldKind;
    fn is_required(&self) -> bool;
    fn is_checked(&self) -> bool;
    /// Render (`Some`) or clear (`None`) the field's inline error.
    fn set_error_state(&mut self, message: Option<&str>);
}

/// The button that triggers submission.
pub trait SubmitControl {
    fn label(&self) -> String;
    fn set_label(&mut self, label: &str);
    fn set_disabled(&mut self, disabled: bool);
    fn set_loading(&mut self, loading: bool);
}

pub trait Connectivity {
    fn is_online(&self) -> bool;
}

/// Fire-and-forget surface for errors that are not tied to a field.
pub trait NotificationSink {
    fn notify(&mut self, message: &str, severity: Severity);
}

pub trait Navigator {
    fn navigate_to(&mut self, destination: &str);
}

/// Everything a form controller needs from the page besides its fields.
pub struct FormHost {
    pub submit: Box<dyn SubmitControl>,
    pub connectivity: Box<dyn Connectivity>,
    pub notifier: Box<dyn NotificationSink>,
    pub navigator: Box<dyn Navigator>,
}
