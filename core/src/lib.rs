//! Core domain logic for formgate.
//!
//! Field validation, the submission state machine, and the timing
//! primitives they run on. The page is reached only through the capability
//! traits in [`host`], so everything here runs without a browser.

pub mod controller;
pub mod host;
pub mod memory;
pub mod notifications;
pub mod rules;
pub mod timing;
pub mod validator;

pub use controller::{FormController, FormEvent};
pub use host::{Connectivity, FieldElement, FormHost, Navigator, NotificationSink, SubmitControl};
pub use memory::{
    MemoryField, MemorySubmitControl, RecordingNavigator, StaticConnectivity, honeypot_field,
};
pub use notifications::{NotificationCenter, Toast};
pub use rules::{Matcher, RuleSet, RuleSetError, ValidationRule};
pub use timing::{Debounce, Debounced, Throttle, Throttled, Timers, debounce, throttle};
pub use validator::{Field, FieldStatus, check_value, validate_field};
