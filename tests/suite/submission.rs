//! Submission lifecycle through the public API.

use std::time::Duration;

use formgate_core::SubmitControl;
use formgate_types::{
    FormSettings, Messages, NonEmptyString, Severity, SubmissionState, SubmitOutcome,
};

use crate::common::ContactForm;

#[test]
fn full_success_path_locks_once_and_navigates_once() {
    let mut page = ContactForm::new();
    page.fill_valid();

    assert_eq!(page.form.submit(), SubmitOutcome::Locked);
    assert_eq!(page.form.state(), SubmissionState::Locked);
    assert_eq!(page.visible_errors(), 0);

    // Repeated clicks while locked are ignored.
    for _ in 0..3 {
        assert_eq!(page.form.submit(), SubmitOutcome::Ignored);
    }
    assert_eq!(page.button.disable_count(), 1);
    assert_eq!(page.button.label(), "Wird gesendet...");

    page.form.advance(Duration::from_millis(250));
    page.form.advance(Duration::from_millis(250));
    assert_eq!(page.navigator.visits(), vec!["thank_you.html".to_string()]);

    page.form.advance(Duration::from_secs(60));
    assert_eq!(page.navigator.visits().len(), 1);
    assert_eq!(page.toasts.delivered(), 0);
}

#[test]
fn optional_phone_may_stay_empty_but_must_be_valid_when_given() {
    let mut page = ContactForm::new();
    page.fill_valid();
    page.phone.1.set_value("12");

    assert_eq!(page.form.submit(), SubmitOutcome::Invalid { errors: 1 });
    assert_eq!(
        page.phone.1.error().as_deref(),
        Some("Bitte geben Sie eine gültige Telefonnummer ein")
    );

    page.phone.1.set_value("+49 170 1234567");
    assert_eq!(page.form.submit(), SubmitOutcome::Locked);
    assert_eq!(page.phone.1.error(), None);
}

#[test]
fn every_invalid_field_is_reported_at_once() {
    let mut page = ContactForm::new();

    assert_eq!(page.form.submit(), SubmitOutcome::Invalid { errors: 4 });
    assert_eq!(page.visible_errors(), 4);
    assert_eq!(page.phone.1.error(), None);
    assert_eq!(page.form.state(), SubmissionState::Idle);
    assert!(!page.button.is_disabled());
}

#[test]
fn honeypot_drop_leaves_no_trace() {
    let mut page = ContactForm::new();
    page.form.honeypot().set_value("https://cheap-pills.example");

    assert_eq!(page.form.submit(), SubmitOutcome::Ignored);
    assert_eq!(page.visible_errors(), 0);
    assert_eq!(page.form.state(), SubmissionState::Idle);

    page.fill_valid();
    assert_eq!(page.form.submit(), SubmitOutcome::Ignored);
    page.form.advance(Duration::from_secs(5));
    assert!(page.navigator.visits().is_empty());
    assert_eq!(page.toasts.delivered(), 0);
    assert_eq!(page.button.disable_count(), 0);
}

#[test]
fn honeypot_is_not_one_of_the_fields() {
    let page = ContactForm::new();
    assert_eq!(page.form.field_count(), 5);
    assert!(page.form.honeypot().is_hidden());
    assert_eq!(page.form.honeypot().name(), "website");
}

#[test]
fn offline_submit_notifies_and_stays_idle() {
    let mut page = ContactForm::new();
    page.fill_valid();
    page.network.set_online(false);

    assert_eq!(page.form.submit(), SubmitOutcome::Offline);
    assert_eq!(page.form.state(), SubmissionState::Idle);
    let toasts = page.toasts.visible();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].severity, Severity::Danger);
    assert!(!page.button.is_disabled());

    page.toasts.advance(Duration::from_secs(5));
    assert!(page.toasts.visible().is_empty());

    page.network.set_online(true);
    assert_eq!(page.form.submit(), SubmitOutcome::Locked);
}

#[test]
fn configured_destination_and_delay_are_used() {
    let settings = FormSettings {
        navigation_delay: Duration::from_millis(50),
        success_destination: NonEmptyString::new("/kontakt/danke").unwrap(),
        ..FormSettings::default()
    };
    let mut page = ContactForm::with(&Messages::default(), settings);
    page.fill_valid();

    page.form.submit();
    page.form.advance(Duration::from_millis(49));
    assert!(page.navigator.visits().is_empty());
    page.form.advance(Duration::from_millis(1));
    assert_eq!(page.navigator.visits(), vec!["/kontakt/danke".to_string()]);
}

#[test]
fn custom_messages_reach_fields_and_button() {
    let messages = Messages {
        required: NonEmptyString::new("This field is required").unwrap(),
        sending: NonEmptyString::new("Sending...").unwrap(),
        ..Messages::default()
    };
    let mut page = ContactForm::with(&messages, FormSettings::default());

    page.form.submit();
    assert_eq!(page.name.1.error().as_deref(), Some("This field is required"));

    page.fill_valid();
    page.form.submit();
    assert_eq!(page.button.label(), "Sending...");
}
