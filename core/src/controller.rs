//! Form submission lifecycle.
//!
//! ```text
//! Idle --submit--> honeypot filled? --yes--> Idle (silent)
//!                        | no
//!                        v
//!                   Validating --any invalid--> Idle
//!                        | all valid
//!                        v
//!                  online? --no--> Idle + notify(danger)
//!                        | yes
//!                        v
//!                      Locked --navigation_delay--> navigate_to(success)
//! ```

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use formgate_types::{
    FieldId, FormSettings, Messages, NonEmptyString, Severity, SubmissionState, SubmitOutcome,
    TaskId, Validation,
};

use crate::host::{FieldElement, FormHost};
use crate::memory::{MemoryField, honeypot_field};
use crate::rules::RuleSet;
use crate::timing::{Debounce, Timers};
use crate::validator::{Field, FieldStatus};

/// A UI event the host forwards to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Blur(FieldId),
    Input(FieldId),
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormTask {
    Revalidate(FieldId),
    Navigate,
}

struct Slot {
    field: Field,
    debounce: Debounce,
}

pub struct FormController {
    rules: Arc<RuleSet>,
    settings: FormSettings,
    send_error: NonEmptyString,
    sending_label: NonEmptyString,
    original_label: String,
    slots: Vec<Slot>,
    honeypot: MemoryField,
    state: SubmissionState,
    timers: Timers<FormTask>,
    navigation: Option<TaskId>,
    navigated: bool,
    host: FormHost,
}

impl FormController {
    #[must_use]
    pub fn new(
        rules: Arc<RuleSet>,
        messages: &Messages,
        settings: FormSettings,
        host: FormHost,
    ) -> Self {
        let honeypot = honeypot_field(&settings.honeypot_name);
        let original_label = host.submit.label();
        Self {
            rules,
            send_error: messages.send_error.clone(),
            sending_label: messages.sending.clone(),
            original_label,
            slots: Vec::new(),
            honeypot,
            state: SubmissionState::Idle,
            timers: Timers::new(),
            navigation: None,
            navigated: false,
            host,
            settings,
        }
    }

    /// Register a visible field. Ids are assigned in registration order.
    pub fn add_field(&mut self, element: impl FieldElement + 'static) -> FieldId {
        let id = FieldId::new(self.slots.len());
        self.slots.push(Slot {
            field: Field::new(Box::new(element)),
            debounce: Debounce::new(self.settings.debounce),
        });
        id
    }

    /// The hidden spam trap. Hosts bind it into the page; it is read once,
    /// at submit time, and never validated.
    #[must_use]
    pub fn honeypot(&self) -> &MemoryField {
        &self.honeypot
    }

    #[must_use]
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn field_status(&self, id: FieldId) -> Option<&FieldStatus> {
        self.slots.get(id.index()).map(|slot| slot.field.status())
    }

    #[must_use]
    pub fn has_pending_validation(&self, id: FieldId) -> bool {
        self.slots
            .get(id.index())
            .is_some_and(|slot| slot.debounce.is_pending(&self.timers))
    }

    #[must_use]
    pub fn is_navigation_pending(&self) -> bool {
        self.navigation
            .is_some_and(|task| self.timers.is_pending(task))
    }

    /// Dispatch a host event. Only `Submit` produces an outcome.
    pub fn handle(&mut self, event: FormEvent) -> Option<SubmitOutcome> {
        match event {
            FormEvent::Blur(id) => {
                self.blur(id);
                None
            }
            FormEvent::Input(id) => {
                self.input(id);
                None
            }
            FormEvent::Submit => Some(self.submit()),
        }
    }

    /// Leaving a field validates it immediately.
    pub fn blur(&mut self, id: FieldId) -> Option<Validation> {
        let slot = self.slots.get_mut(id.index())?;
        Some(slot.field.validate(&self.rules))
    }

    /// Typing into a field arms a debounced re-check. The check only runs if
    /// the field still shows an error when the quiet period ends, so a first
    /// answer is never flagged mid-typing while a fixed one clears promptly.
    pub fn input(&mut self, id: FieldId) {
        let Some(slot) = self.slots.get_mut(id.index()) else {
            return;
        };
        slot.debounce.call(&mut self.timers, FormTask::Revalidate(id));
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if !self.state.accepts_submit() || !self.honeypot.value().is_empty() {
            debug!("submit ignored");
            return SubmitOutcome::Ignored;
        }

        self.transition(SubmissionState::Validating);
        let mut errors = 0;
        for slot in &mut self.slots {
            if slot.field.validate(&self.rules).is_err() {
                errors += 1;
            }
        }
        if errors > 0 {
            self.transition(SubmissionState::Idle);
            return SubmitOutcome::Invalid { errors };
        }

        if !self.host.connectivity.is_online() {
            self.transition(SubmissionState::Idle);
            warn!("submit blocked: offline");
            self.host
                .notifier
                .notify(self.send_error.as_str(), Severity::Danger);
            return SubmitOutcome::Offline;
        }

        self.lock();
        self.transition(SubmissionState::Locked);
        self.navigation = Some(
            self.timers
                .schedule(self.settings.navigation_delay, FormTask::Navigate),
        );
        info!(
            destination = %self.settings.success_destination,
            delay_ms = self.settings.navigation_delay.as_millis() as u64,
            "form locked"
        );
        SubmitOutcome::Locked
    }

    /// Return a locked form to `Idle` after the hand-off to navigation has
    /// already happened and failed. Refused while the navigation timer is
    /// still armed, since that timer cannot be cancelled.
    pub fn unlock(&mut self) -> bool {
        if self.state != SubmissionState::Locked || !self.navigated {
            return false;
        }
        let submit = &mut self.host.submit;
        submit.set_disabled(false);
        submit.set_loading(false);
        submit.set_label(&self.original_label);
        self.navigated = false;
        self.transition(SubmissionState::Idle);
        true
    }

    /// Advance the controller's clock and run every timer that came due.
    pub fn advance(&mut self, delta: Duration) {
        for task in self.timers.advance(delta) {
            match task {
                FormTask::Revalidate(id) => self.revalidate(id),
                FormTask::Navigate => self.navigate(),
            }
        }
    }

    /// Detach from the page. Pending debounced checks are cancelled; an armed
    /// navigation goes away with the page.
    pub fn teardown(mut self) {
        let mut cancelled = 0;
        for slot in &mut self.slots {
            if slot.debounce.cancel(&mut self.timers) {
                cancelled += 1;
            }
        }
        debug!(cancelled, state = %self.state, "form torn down");
    }

    fn revalidate(&mut self, id: FieldId) {
        let Some(slot) = self.slots.get_mut(id.index()) else {
            return;
        };
        if slot.field.is_marked_invalid() {
            let _ = slot.field.validate(&self.rules);
        }
    }

    fn navigate(&mut self) {
        self.navigation = None;
        self.navigated = true;
        info!(destination = %self.settings.success_destination, "navigating");
        self.host
            .navigator
            .navigate_to(self.settings.success_destination.as_str());
    }

    fn lock(&mut self) {
        let submit = &mut self.host.submit;
        submit.set_disabled(true);
        submit.set_loading(true);
        submit.set_label(self.sending_label.as_str());
    }

    fn transition(&mut self, next: SubmissionState) {
        debug!(from = %self.state, to = %next, "submission state");
        self.state = next;
    }
}
