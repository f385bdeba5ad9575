//! In-memory implementations of the host capabilities.
//!
//! Each type is a cheap handle over shared state, mirroring how a page
//! element is referenced from several places at once: the controller owns
//! one handle, the host (or a test) keeps another to drive and inspect it.
//! Everything runs on a single event-processing context, so `Rc<RefCell>`
//! is sufficient.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use formgate_types::{FieldKind, NonEmptyString};

use crate::host::{Connectivity, FieldElement, Navigator, SubmitControl};

const CHECKBOX_DEFAULT_VALUE: &str = "on";

#[derive(Debug, Default)]
struct FieldState {
    name: String,
    kind: FieldKind,
    required: bool,
    hidden: bool,
    value: String,
    checked: bool,
    error: Option<String>,
}

/// Shared handle to an in-memory input.
#[derive(Debug, Clone, Default)]
pub struct MemoryField {
    state: Rc<RefCell<FieldState>>,
}

impl MemoryField {
    /// Checkbox fields start with the browser's default submitted value
    /// `"on"`; everything else starts empty.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let value = if kind == FieldKind::Checkbox {
            CHECKBOX_DEFAULT_VALUE.to_string()
        } else {
            String::new()
        };
        Self {
            state: Rc::new(RefCell::new(FieldState {
                name: name.into(),
                kind,
                value,
                ..FieldState::default()
            })),
        }
    }

    #[must_use]
    pub fn required(self) -> Self {
        self.state.borrow_mut().required = true;
        self
    }

    #[must_use]
    pub fn with_value(self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    pub fn set_value(&self, value: impl Into<String>) {
        self.state.borrow_mut().value = value.into();
    }

    pub fn set_checked(&self, checked: bool) {
        self.state.borrow_mut().checked = checked;
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.state.borrow().name.clone()
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.state.borrow().hidden
    }

    /// Currently rendered inline error, if any.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }
}

impl FieldElement for MemoryField {
    fn value(&self) -> String {
        self.state.borrow().value.clone()
    }

    fn kind(&self) -> FieldKind {
        self.state.borrow().kind
    }

    fn is_required(&self) -> bool {
        self.state.borrow().required
    }

    fn is_checked(&self) -> bool {
        self.state.borrow().checked
    }

    fn set_error_state(&mut self, message: Option<&str>) {
        self.state.borrow_mut().error = message.map(str::to_string);
    }
}

/// Create the spam trap: a hidden, optional, generic text input that no
/// human fills in.
#[must_use]
pub fn honeypot_field(name: &NonEmptyString) -> MemoryField {
    let field = MemoryField::new(name.as_str(), FieldKind::Generic);
    field.state.borrow_mut().hidden = true;
    field
}

#[derive(Debug, Default)]
struct SubmitState {
    label: String,
    disabled: bool,
    loading: bool,
    disable_count: usize,
}

/// Shared handle to an in-memory submit button.
#[derive(Debug, Clone, Default)]
pub struct MemorySubmitControl {
    state: Rc<RefCell<SubmitState>>,
}

impl MemorySubmitControl {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            state: Rc::new(RefCell::new(SubmitState {
                label: label.into(),
                ..SubmitState::default()
            })),
        }
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.state.borrow().disabled
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// How many times the control went from enabled to disabled.
    #[must_use]
    pub fn disable_count(&self) -> usize {
        self.state.borrow().disable_count
    }
}

impl SubmitControl for MemorySubmitControl {
    fn label(&self) -> String {
        self.state.borrow().label.clone()
    }

    fn set_label(&mut self, label: &str) {
        self.state.borrow_mut().label = label.to_string();
    }

    fn set_disabled(&mut self, disabled: bool) {
        let mut state = self.state.borrow_mut();
        if disabled && !state.disabled {
            state.disable_count += 1;
        }
        state.disabled = disabled;
    }

    fn set_loading(&mut self, loading: bool) {
        self.state.borrow_mut().loading = loading;
    }
}

/// Connectivity probe with a switchable answer.
#[derive(Debug, Clone)]
pub struct StaticConnectivity {
    online: Rc<Cell<bool>>,
}

impl StaticConnectivity {
    #[must_use]
    pub fn new(online: bool) -> Self {
        Self {
            online: Rc::new(Cell::new(online)),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.set(online);
    }
}

impl Connectivity for StaticConnectivity {
    fn is_online(&self) -> bool {
        self.online.get()
    }
}

/// Navigator that records destinations instead of leaving the page.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    visits: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn visits(&self) -> Vec<String> {
        self.visits.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&mut self, destination: &str) {
        self.visits.borrow_mut().push(destination.to_string());
    }
}
