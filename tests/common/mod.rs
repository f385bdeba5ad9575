//! Shared test utilities and fixtures
//!
//! A contact form wired to in-memory collaborators, shaped like the page
//! the library was built for: name, email, phone, message and consent.

#![allow(dead_code)]

use std::sync::Arc;

use formgate_core::{
    FormController, FormHost, MemoryField, MemorySubmitControl, NotificationCenter,
    RecordingNavigator, RuleSet, StaticConnectivity,
};
use formgate_types::{FieldId, FieldKind, FormSettings, Messages};

pub struct ContactForm {
    pub form: FormController,
    pub name: (FieldId, MemoryField),
    pub email: (FieldId, MemoryField),
    pub phone: (FieldId, MemoryField),
    pub message: (FieldId, MemoryField),
    pub consent: (FieldId, MemoryField),
    pub button: MemorySubmitControl,
    pub network: StaticConnectivity,
    pub toasts: NotificationCenter,
    pub navigator: RecordingNavigator,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::with(&Messages::default(), FormSettings::default())
    }

    pub fn with(messages: &Messages, settings: FormSettings) -> Self {
        let rules = Arc::new(RuleSet::new(messages).expect("built-in patterns compile"));
        let button = MemorySubmitControl::new("Nachricht senden");
        let network = StaticConnectivity::new(true);
        let toasts = NotificationCenter::new(settings.notification_dismiss);
        let navigator = RecordingNavigator::new();
        let host = FormHost {
            submit: Box::new(button.clone()),
            connectivity: Box::new(network.clone()),
            notifier: Box::new(toasts.clone()),
            navigator: Box::new(navigator.clone()),
        };
        let mut form = FormController::new(rules, messages, settings, host);

        let mut add = |element: MemoryField| (form.add_field(element.clone()), element);
        let name = add(MemoryField::new("name", FieldKind::classify("text", "name")).required());
        let email =
            add(MemoryField::new("email", FieldKind::classify("email", "email")).required());
        // Phone is optional on the page.
        let phone = add(MemoryField::new("phone", FieldKind::classify("tel", "phone")));
        let message =
            add(MemoryField::new("message", FieldKind::classify("textarea", "message")).required());
        let consent =
            add(MemoryField::new("privacy", FieldKind::classify("checkbox", "privacy")).required());

        Self {
            form,
            name,
            email,
            phone,
            message,
            consent,
            button,
            network,
            toasts,
            navigator,
        }
    }

    pub fn fill_valid(&self) {
        self.name.1.set_value("Jürgen Müller");
        self.email.1.set_value("juergen@example.de");
        self.message.1.set_value("Ich interessiere mich für ein Angebot.");
        self.consent.1.set_checked(true);
    }

    pub fn all_fields(&self) -> [&MemoryField; 5] {
        [
            &self.name.1,
            &self.email.1,
            &self.phone.1,
            &self.message.1,
            &self.consent.1,
        ]
    }

    pub fn visible_errors(&self) -> usize {
        self.all_fields()
            .iter()
            .filter(|field| field.error().is_some())
            .count()
    }
}

pub const CONTACT_SCENARIO: &str = r#"{
    "submit_label": "Nachricht senden",
    "fields": [
        {"name": "name", "required": true},
        {"name": "email", "input_type": "email", "required": true},
        {"name": "phone", "input_type": "tel"},
        {"name": "message", "required": true},
        {"name": "privacy", "input_type": "checkbox", "required": true}
    ],
    "steps": []
}"#;

/// The contact scenario with `steps` replaced.
pub fn contact_scenario(steps: &serde_json::Value) -> String {
    let mut scenario: serde_json::Value =
        serde_json::from_str(CONTACT_SCENARIO).expect("fixture is valid JSON");
    scenario["steps"] = steps.clone();
    scenario.to_string()
}
