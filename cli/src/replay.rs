//! Headless replay of scripted form sessions.
//!
//! A scenario describes the form's fields and a sequence of user actions.
//! Replaying drives a [`FormController`] wired to in-memory collaborators
//! and reports what a visitor would have seen.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use formgate_config::FormgateConfig;
use formgate_core::{
    FieldElement, FieldStatus, FormController, FormHost, MemoryField, MemorySubmitControl,
    NotificationCenter, RecordingNavigator, RuleSet, RuleSetError, StaticConnectivity,
    SubmitControl, Toast,
};
use formgate_types::{FieldId, FieldKind, SubmissionState, SubmitOutcome};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("invalid scenario: {0}")]
    Json(#[from] serde_json::Error),
    #[error("field `{0}` is declared twice")]
    DuplicateField(String),
    #[error("step {step} refers to unknown field `{field}`")]
    UnknownField { step: usize, field: String },
    #[error(transparent)]
    Rules(#[from] RuleSetError),
}

fn default_true() -> bool {
    true
}

fn default_label() -> String {
    "Absenden".to_string()
}

#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_true")]
    pub online: bool,
    #[serde(default = "default_label")]
    pub submit_label: String,
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A field declaration. `kind` wins; otherwise the kind is derived from the
/// markup attributes `input_type` and `id`.
#[derive(Debug, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(default)]
    pub kind: Option<FieldKind>,
    #[serde(default)]
    pub input_type: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub checked: bool,
}

impl FieldSpec {
    fn resolved_kind(&self) -> FieldKind {
        self.kind.unwrap_or_else(|| {
            FieldKind::classify(self.input_type.as_deref().unwrap_or("text"), &self.name)
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Replace a field's value without firing any event.
    Set { field: String, value: String },
    /// Replace a field's value and fire an input event.
    Type { field: String, value: String },
    Check { field: String, checked: bool },
    Blur(String),
    Input(String),
    Submit,
    WaitMs(u64),
    Online(bool),
    Honeypot(String),
}

#[derive(Debug, Serialize)]
pub struct StepOutcome {
    pub step: usize,
    #[serde(flatten)]
    pub outcome: SubmitOutcome,
}

#[derive(Debug, Serialize)]
pub struct FieldReport {
    pub name: String,
    pub kind: FieldKind,
    pub status: &'static str,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub state: SubmissionState,
    pub submissions: Vec<StepOutcome>,
    pub fields: Vec<FieldReport>,
    pub notifications: Vec<Toast>,
    pub navigations: Vec<String>,
    pub submit_label: String,
    pub submit_disabled: bool,
}

struct Session {
    form: FormController,
    fields: Vec<(String, MemoryField)>,
    ids: HashMap<String, FieldId>,
    button: MemorySubmitControl,
    network: StaticConnectivity,
    toasts: NotificationCenter,
    navigator: RecordingNavigator,
}

impl Session {
    fn new(scenario: &Scenario, config: &FormgateConfig) -> Result<Self, ScenarioError> {
        let rules = Arc::new(RuleSet::new(&config.messages)?);
        let button = MemorySubmitControl::new(scenario.submit_label.clone());
        let network = StaticConnectivity::new(scenario.online);
        let toasts = NotificationCenter::new(config.settings.notification_dismiss);
        let navigator = RecordingNavigator::new();
        let host = FormHost {
            submit: Box::new(button.clone()),
            connectivity: Box::new(network.clone()),
            notifier: Box::new(toasts.clone()),
            navigator: Box::new(navigator.clone()),
        };
        let mut form = FormController::new(rules, &config.messages, config.settings.clone(), host);

        let mut fields = Vec::with_capacity(scenario.fields.len());
        let mut ids = HashMap::new();
        for spec in &scenario.fields {
            if ids.contains_key(&spec.name) {
                return Err(ScenarioError::DuplicateField(spec.name.clone()));
            }
            let mut element = MemoryField::new(spec.name.clone(), spec.resolved_kind());
            if spec.required {
                element = element.required();
            }
            if let Some(value) = &spec.value {
                element.set_value(value.clone());
            }
            element.set_checked(spec.checked);
            let id = form.add_field(element.clone());
            ids.insert(spec.name.clone(), id);
            fields.push((spec.name.clone(), element));
        }

        Ok(Self {
            form,
            fields,
            ids,
            button,
            network,
            toasts,
            navigator,
        })
    }

    fn lookup(&self, step: usize, name: &str) -> Result<(FieldId, &MemoryField), ScenarioError> {
        let unknown = || ScenarioError::UnknownField {
            step,
            field: name.to_string(),
        };
        let id = *self.ids.get(name).ok_or_else(unknown)?;
        let (_, element) = self.fields.get(id.index()).ok_or_else(unknown)?;
        Ok((id, element))
    }

    fn wait(&mut self, delta: Duration) {
        self.form.advance(delta);
        self.toasts.advance(delta);
    }

    fn run(&mut self, index: usize, step: &Step) -> Result<Option<SubmitOutcome>, ScenarioError> {
        match step {
            Step::Set { field, value } => {
                let (_, element) = self.lookup(index, field)?;
                element.set_value(value.clone());
            }
            Step::Type { field, value } => {
                let (id, element) = self.lookup(index, field)?;
                element.set_value(value.clone());
                self.form.input(id);
            }
            Step::Check { field, checked } => {
                let (_, element) = self.lookup(index, field)?;
                element.set_checked(*checked);
            }
            Step::Blur(field) => {
                let (id, _) = self.lookup(index, field)?;
                self.form.blur(id);
            }
            Step::Input(field) => {
                let (id, _) = self.lookup(index, field)?;
                self.form.input(id);
            }
            Step::Submit => return Ok(Some(self.form.submit())),
            Step::WaitMs(ms) => self.wait(Duration::from_millis(*ms)),
            Step::Online(online) => self.network.set_online(*online),
            Step::Honeypot(value) => self.form.honeypot().set_value(value.clone()),
        }
        Ok(None)
    }

    fn report(&self, submissions: Vec<StepOutcome>) -> ReplayReport {
        let fields = self
            .fields
            .iter()
            .enumerate()
            .map(|(index, (name, element))| {
                let status = match self.form.field_status(FieldId::new(index)) {
                    Some(FieldStatus::Valid) => "valid",
                    Some(FieldStatus::Invalid(_)) => "invalid",
                    Some(FieldStatus::Pristine) | None => "pristine",
                };
                FieldReport {
                    name: name.clone(),
                    kind: element.kind(),
                    status,
                    error: element.error(),
                }
            })
            .collect();

        ReplayReport {
            state: self.form.state(),
            submissions,
            fields,
            notifications: self.toasts.visible(),
            navigations: self.navigator.visits(),
            submit_label: self.button.label(),
            submit_disabled: self.button.is_disabled(),
        }
    }
}

/// Replay `scenario` against a fresh form configured by `config`.
pub fn replay(scenario: &Scenario, config: &FormgateConfig) -> Result<ReplayReport, ScenarioError> {
    let mut session = Session::new(scenario, config)?;
    let mut submissions = Vec::new();
    for (index, step) in scenario.steps.iter().enumerate() {
        if let Some(outcome) = session.run(index, step)? {
            tracing::debug!(step = index, ?outcome, "submit");
            submissions.push(StepOutcome {
                step: index,
                outcome,
            });
        }
    }
    Ok(session.report(submissions))
}

/// Parse a scenario from JSON text.
pub fn parse_scenario(json: &str) -> Result<Scenario, ScenarioError> {
    Ok(serde_json::from_str(json)?)
}
