//! Submission lifecycle types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Form submission state.
///
/// `Idle -> Validating -> Idle | Locked`. `Locked` is terminal unless the
/// host explicitly unlocks after a failed hand-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Locked,
}

impl SubmissionState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Locked => "locked",
        }
    }

    /// Whether a submit event would be processed in this state.
    #[must_use]
    pub const fn accepts_submit(self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a submit event led to, as seen by the host.
///
/// A honeypot drop and a re-entrant submit both report `Ignored`; the two
/// are indistinguishable from outside the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Ignored,
    Invalid { errors: usize },
    Offline,
    Locked,
}

/// Severity of a notification toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Danger,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
