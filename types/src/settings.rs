//! Resolved configuration types shared across crates.
//!
//! These types represent fully-validated configuration state. Raw TOML
//! structs (with `Option` fields) stay private in `formgate-config`, which
//! resolves them into these types at the parse boundary.

use std::time::Duration;

use crate::{NonEmptyStaticStr, NonEmptyString};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);
pub const DEFAULT_NAVIGATION_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_NOTIFICATION_DISMISS: Duration = Duration::from_millis(5000);
pub const DEFAULT_SUCCESS_DESTINATION: NonEmptyStaticStr = NonEmptyStaticStr::new("thank_you.html");
pub const DEFAULT_HONEYPOT_NAME: NonEmptyStaticStr = NonEmptyStaticStr::new("website");

/// Timing and routing knobs for a form controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSettings {
    /// Quiet period before an invalid field is re-checked while typing.
    pub debounce: Duration,
    /// Delay between locking the form and navigating away.
    pub navigation_delay: Duration,
    /// How long a toast stays visible.
    pub notification_dismiss: Duration,
    pub success_destination: NonEmptyString,
    pub honeypot_name: NonEmptyString,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            navigation_delay: DEFAULT_NAVIGATION_DELAY,
            notification_dismiss: DEFAULT_NOTIFICATION_DISMISS,
            success_destination: DEFAULT_SUCCESS_DESTINATION.into(),
            honeypot_name: DEFAULT_HONEYPOT_NAME.into(),
        }
    }
}

/// Every user-facing text the form can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub required: NonEmptyString,
    pub invalid_email: NonEmptyString,
    pub invalid_phone: NonEmptyString,
    pub invalid_name: NonEmptyString,
    pub short_message: NonEmptyString,
    pub consent_required: NonEmptyString,
    /// Shown through the notification sink when the browser is offline.
    pub send_error: NonEmptyString,
    /// Submit button label while locked.
    pub sending: NonEmptyString,
    pub success: NonEmptyString,
}

impl Default for Messages {
    fn default() -> Self {
        const REQUIRED: NonEmptyStaticStr = NonEmptyStaticStr::new("Dieses Feld ist erforderlich");
        const INVALID_EMAIL: NonEmptyStaticStr =
            NonEmptyStaticStr::new("Bitte geben Sie eine gültige E-Mail-Adresse ein");
        const INVALID_PHONE: NonEmptyStaticStr =
            NonEmptyStaticStr::new("Bitte geben Sie eine gültige Telefonnummer ein");
        const INVALID_NAME: NonEmptyStaticStr =
            NonEmptyStaticStr::new("Name muss 2-50 Zeichen lang sein");
        const SHORT_MESSAGE: NonEmptyStaticStr =
            NonEmptyStaticStr::new("Nachricht muss mindestens 10 Zeichen enthalten");
        const CONSENT_REQUIRED: NonEmptyStaticStr =
            NonEmptyStaticStr::new("Bitte akzeptieren Sie die Datenschutzerklärung");
        const SEND_ERROR: NonEmptyStaticStr =
            NonEmptyStaticStr::new("Fehler beim Senden. Bitte versuchen Sie es erneut.");
        const SENDING: NonEmptyStaticStr = NonEmptyStaticStr::new("Wird gesendet...");
        const SUCCESS: NonEmptyStaticStr =
            NonEmptyStaticStr::new("Ihre Nachricht wurde erfolgreich gesendet!");

        Self {
            required: REQUIRED.into(),
            invalid_email: INVALID_EMAIL.into(),
            invalid_phone: INVALID_PHONE.into(),
            invalid_name: INVALID_NAME.into(),
            short_message: SHORT_MESSAGE.into(),
            consent_required: CONSENT_REQUIRED.into(),
            send_error: SEND_ERROR.into(),
            sending: SENDING.into(),
            success: SUCCESS.into(),
        }
    }
}
