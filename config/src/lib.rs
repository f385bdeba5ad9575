//! Configuration loading for formgate.
//!
//! ```toml
//! [form]
//! debounce_ms = 150
//! navigation_delay_ms = 500
//! notification_dismiss_ms = 5000
//! success_destination = "thank_you.html"
//! honeypot_name = "website"
//!
//! [messages]
//! required = "This field is required"
//! send_error = "Could not send. Please try again."
//! ```
//!
//! Every key is optional. Raw TOML structs stay private; callers only see
//! the resolved [`FormSettings`] and [`Messages`].

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use formgate_types::{FormSettings, Messages, NonEmptyString};

/// Environment variable that points at an explicit config file.
pub const CONFIG_ENV_VAR: &str = "FORMGATE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for `{key}` in {}: must not be empty", .path.display())]
    Empty { path: PathBuf, key: &'static str },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Empty { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    form: Option<RawForm>,
    messages: Option<RawMessages>,
}

#[derive(Debug, Default, Deserialize)]
struct RawForm {
    debounce_ms: Option<u64>,
    navigation_delay_ms: Option<u64>,
    notification_dismiss_ms: Option<u64>,
    success_destination: Option<String>,
    honeypot_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMessages {
    required: Option<String>,
    invalid_email: Option<String>,
    invalid_phone: Option<String>,
    invalid_name: Option<String>,
    short_message: Option<String>,
    consent_required: Option<String>,
    send_error: Option<String>,
    sending: Option<String>,
    success: Option<String>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormgateConfig {
    pub settings: FormSettings,
    pub messages: Messages,
}

fn override_text(
    slot: &mut NonEmptyString,
    raw: Option<String>,
    key: &'static str,
    origin: &Path,
) -> Result<(), ConfigError> {
    if let Some(raw) = raw {
        *slot = NonEmptyString::new(raw).map_err(|_| ConfigError::Empty {
            path: origin.to_path_buf(),
            key,
        })?;
    }
    Ok(())
}

fn override_millis(slot: &mut Duration, raw: Option<u64>) {
    if let Some(ms) = raw {
        *slot = Duration::from_millis(ms);
    }
}

impl FormgateConfig {
    /// Parse TOML text. `origin` names the source in error messages.
    pub fn parse(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        Self::resolve(raw, origin)
    }

    fn resolve(raw: RawConfig, origin: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let form = raw.form.unwrap_or_default();
        let settings = &mut config.settings;
        override_millis(&mut settings.debounce, form.debounce_ms);
        override_millis(&mut settings.navigation_delay, form.navigation_delay_ms);
        override_millis(
            &mut settings.notification_dismiss,
            form.notification_dismiss_ms,
        );
        override_text(
            &mut settings.success_destination,
            form.success_destination,
            "form.success_destination",
            origin,
        )?;
        override_text(
            &mut settings.honeypot_name,
            form.honeypot_name,
            "form.honeypot_name",
            origin,
        )?;

        let text = raw.messages.unwrap_or_default();
        let messages = &mut config.messages;
        override_text(&mut messages.required, text.required, "messages.required", origin)?;
        override_text(
            &mut messages.invalid_email,
            text.invalid_email,
            "messages.invalid_email",
            origin,
        )?;
        override_text(
            &mut messages.invalid_phone,
            text.invalid_phone,
            "messages.invalid_phone",
            origin,
        )?;
        override_text(
            &mut messages.invalid_name,
            text.invalid_name,
            "messages.invalid_name",
            origin,
        )?;
        override_text(
            &mut messages.short_message,
            text.short_message,
            "messages.short_message",
            origin,
        )?;
        override_text(
            &mut messages.consent_required,
            text.consent_required,
            "messages.consent_required",
            origin,
        )?;
        override_text(
            &mut messages.send_error,
            text.send_error,
            "messages.send_error",
            origin,
        )?;
        override_text(&mut messages.sending, text.sending, "messages.sending", origin)?;
        override_text(&mut messages.success, text.success, "messages.success", origin)?;

        Ok(config)
    }

    /// Load a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Load the default config file. `Ok(None)` when there is no file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_optional(&path),
            None => Ok(None),
        }
    }

    /// Load `path` if it exists. Failures are logged here, once, before
    /// being returned.
    pub fn load_optional(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        match Self::load_from(path) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to load config at {:?}: {}", path, err);
                Err(err)
            }
        }
    }
}

/// `$FORMGATE_CONFIG` if set, otherwise `~/.formgate/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Ok(explicit) = env::var(CONFIG_ENV_VAR)
        && !explicit.trim().is_empty()
    {
        return Some(PathBuf::from(explicit));
    }
    dirs::home_dir().map(|home| home.join(".formgate").join("config.toml"))
}
