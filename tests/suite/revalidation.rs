//! Blur and input trigger policy.

use std::time::Duration;

use formgate_core::FieldStatus;
use formgate_types::{FieldError, FieldKind, FormSettings, Messages};

use crate::common::ContactForm;

const MS: Duration = Duration::from_millis(1);

#[test]
fn blur_flags_immediately_and_typing_clears_after_quiet_period() {
    let mut page = ContactForm::new();
    let (email, handle) = page.email.clone();

    handle.set_value("juergen@");
    let invalid = page.form.blur(email).unwrap().unwrap_err();
    assert_eq!(invalid.error, FieldError::PatternMismatch(FieldKind::Email));

    let typed = "juergen@example.de";
    for end in "juergen@".len() + 1..=typed.len() {
        handle.set_value(&typed[..end]);
        page.form.input(email);
        page.form.advance(MS * 20);
    }
    assert!(handle.error().is_some());
    assert!(page.form.has_pending_validation(email));

    page.form.advance(MS * 130);
    assert_eq!(handle.error(), None);
    assert_eq!(page.form.field_status(email), Some(&FieldStatus::Valid));
}

#[test]
fn revalidation_uses_value_at_quiescence() {
    let mut page = ContactForm::new();
    let (message, handle) = page.message.clone();

    handle.set_value("kurz");
    page.form.blur(message);

    handle.set_value("lang genug jetzt");
    page.form.input(message);
    page.form.advance(MS * 100);
    handle.set_value("kurz");
    page.form.input(message);
    page.form.advance(MS * 150);

    assert_eq!(
        handle.error().as_deref(),
        Some("Nachricht muss mindestens 10 Zeichen enthalten")
    );
}

#[test]
fn typing_a_first_answer_never_shows_errors() {
    let mut page = ContactForm::new();
    let (name, handle) = page.name.clone();

    for partial in ["J", "Jü", "Jür"] {
        handle.set_value(partial);
        page.form.input(name);
        page.form.advance(MS * 200);
        assert_eq!(handle.error(), None);
    }
    assert_eq!(page.form.field_status(name), Some(&FieldStatus::Pristine));
}

#[test]
fn blur_on_valid_field_keeps_it_clear() {
    let mut page = ContactForm::new();
    let (name, handle) = page.name.clone();
    handle.set_value("Anne-Marie O'Neil");
    assert!(page.form.blur(name).unwrap().is_ok());
    assert!(page.form.blur(name).unwrap().is_ok());
    assert_eq!(handle.error(), None);
}

#[test]
fn debounce_delay_follows_settings() {
    let settings = FormSettings {
        debounce: MS * 400,
        ..FormSettings::default()
    };
    let mut page = ContactForm::with(&Messages::default(), settings);
    let (email, handle) = page.email.clone();

    page.form.blur(email);
    handle.set_value("juergen@example.de");
    page.form.input(email);
    page.form.advance(MS * 399);
    assert!(handle.error().is_some());
    page.form.advance(MS);
    assert_eq!(handle.error(), None);
}
