//! Core domain types for formgate.
//!
//! This crate contains pure domain types with no IO, no timers, and minimal
//! dependencies. Everything here can be used from any layer.

mod field;
mod ids;
mod proofs;
mod settings;
mod submission;

pub use field::{FieldError, FieldKind, Invalid, Validation};
pub use ids::{FieldId, TaskId, ToastId};
pub use proofs::{EmptyStringError, NonEmptyStaticStr, NonEmptyString};
pub use settings::{
    DEFAULT_DEBOUNCE, DEFAULT_HONEYPOT_NAME, DEFAULT_NAVIGATION_DELAY,
    DEFAULT_NOTIFICATION_DISMISS, DEFAULT_SUCCESS_DESTINATION, FormSettings, Messages,
};
pub use submission::{Severity, SubmissionState, SubmitOutcome};
