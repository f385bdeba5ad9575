//! End-to-end replays of the contact page scenario.

use std::io::Write;

use formgate::{parse_scenario, replay};
use formgate_config::FormgateConfig;
use formgate_types::{Severity, SubmissionState, SubmitOutcome};
use serde_json::json;

use crate::common::contact_scenario;

fn run(steps: &serde_json::Value, config: &FormgateConfig) -> formgate::ReplayReport {
    let scenario = parse_scenario(&contact_scenario(steps)).expect("scenario parses");
    replay(&scenario, config).expect("scenario replays")
}

fn valid_answers() -> serde_json::Value {
    json!([
        {"set": {"field": "name", "value": "Jürgen Müller"}},
        {"set": {"field": "email", "value": "juergen@example.de"}},
        {"set": {"field": "message", "value": "Bitte um Rückruf am Vormittag."}},
        {"check": {"field": "privacy", "checked": true}}
    ])
}

fn with_tail(tail: &[serde_json::Value]) -> serde_json::Value {
    let mut steps = valid_answers();
    let list = steps.as_array_mut().expect("array literal");
    list.extend(tail.iter().cloned());
    steps
}

#[test]
fn double_click_sends_once() {
    let report = run(
        &with_tail(&[json!("submit"), json!("submit"), json!({"wait_ms": 500})]),
        &FormgateConfig::default(),
    );

    let outcomes: Vec<_> = report.submissions.iter().map(|s| s.outcome).collect();
    assert_eq!(outcomes, vec![SubmitOutcome::Locked, SubmitOutcome::Ignored]);
    assert_eq!(report.state, SubmissionState::Locked);
    assert_eq!(report.navigations, vec!["thank_you.html".to_string()]);
    assert_eq!(report.submit_label, "Wird gesendet...");
    assert!(report.submit_disabled);
}

#[test]
fn empty_submit_flags_required_fields_only() {
    let report = run(&json!(["submit"]), &FormgateConfig::default());

    assert_eq!(report.submissions[0].outcome, SubmitOutcome::Invalid { errors: 4 });
    let flagged: Vec<_> = report
        .fields
        .iter()
        .filter(|field| field.status == "invalid")
        .map(|field| field.name.as_str())
        .collect();
    assert_eq!(flagged, vec!["name", "email", "message", "privacy"]);
    let phone = report.fields.iter().find(|f| f.name == "phone").unwrap();
    assert_eq!(phone.status, "valid");
    assert_eq!(phone.error, None);
    assert!(!report.submit_disabled);
    assert_eq!(report.submit_label, "Nachricht senden");
}

#[test]
fn offline_then_online_recovers() {
    let report = run(
        &with_tail(&[
            json!({"online": false}),
            json!("submit"),
            json!({"online": true}),
            json!("submit"),
        ]),
        &FormgateConfig::default(),
    );

    let outcomes: Vec<_> = report.submissions.iter().map(|s| s.outcome).collect();
    assert_eq!(outcomes, vec![SubmitOutcome::Offline, SubmitOutcome::Locked]);
    assert_eq!(report.notifications.len(), 1);
    assert_eq!(report.notifications[0].severity, Severity::Danger);
    assert_eq!(
        report.notifications[0].message,
        "Fehler beim Senden. Bitte versuchen Sie es erneut."
    );
}

#[test]
fn offline_notification_dismisses_itself() {
    let report = run(
        &with_tail(&[
            json!({"online": false}),
            json!("submit"),
            json!({"wait_ms": 5000}),
        ]),
        &FormgateConfig::default(),
    );
    assert!(report.notifications.is_empty());
    assert_eq!(report.state, SubmissionState::Idle);
}

#[test]
fn bot_filled_honeypot_is_silent() {
    let report = run(
        &with_tail(&[
            json!({"honeypot": "http://spam.example"}),
            json!("submit"),
            json!({"wait_ms": 1000}),
        ]),
        &FormgateConfig::default(),
    );
    assert_eq!(report.submissions[0].outcome, SubmitOutcome::Ignored);
    assert!(report.navigations.is_empty());
    assert!(report.notifications.is_empty());
    assert!(report.fields.iter().all(|field| field.error.is_none()));
    assert_eq!(report.state, SubmissionState::Idle);
}

#[test]
fn fixing_a_field_clears_its_error_after_typing_stops() {
    let report = run(
        &json!([
            {"set": {"field": "email", "value": "juergen"}},
            {"blur": "email"},
            {"type": {"field": "email", "value": "juergen@example.de"}},
            {"wait_ms": 150}
        ]),
        &FormgateConfig::default(),
    );
    let email = report.fields.iter().find(|f| f.name == "email").unwrap();
    assert_eq!(email.status, "valid");
    assert_eq!(email.error, None);
}

#[test]
fn config_file_overrides_destination_and_text() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[form]
navigation_delay_ms = 100
success_destination = "/danke"

[messages]
sending = "Sending..."
"#
    )
    .unwrap();
    let config = FormgateConfig::load_from(file.path()).unwrap();

    let report = run(&with_tail(&[json!("submit"), json!({"wait_ms": 100})]), &config);
    assert_eq!(report.navigations, vec!["/danke".to_string()]);
    assert_eq!(report.submit_label, "Sending...");
}

#[test]
fn report_serializes_outcomes_with_tags() {
    let report = run(&json!(["submit"]), &FormgateConfig::default());
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["state"], "idle");
    assert_eq!(value["submissions"][0]["outcome"], "invalid");
    assert_eq!(value["submissions"][0]["errors"], 4);
    assert_eq!(value["submissions"][0]["step"], 0);
}
