use crate::domain::contact::models::message::MessageBody;
use crate::domain::contact::models::name::FullName;
use crate::domain::rate_limit::RateLimiter;
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::time::Duration;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub smtp: SmtpSettings,
    pub rate_limit: RateLimitSettings,
    pub general: GeneralSettings,
}

impl Settings {
    pub fn log_level(&self) -> String {
        self.general.log_level.clone()
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    /// Take the client address from `Forwarded`/`X-Forwarded-For`. Only
    /// safe behind a proxy that overwrites those headers.
    pub trust_forwarded_for: bool,
    /// Comma separated origins allowed by CORS, `*` for any.
    pub allowed_origins: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_payload_bytes: usize,
}

impl ApplicationSettings {
    /// `None` means any origin.
    pub fn allowed_origins(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();
        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            None
        } else {
            Some(origins)
        }
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct SmtpSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub username: String,
    pub password: Secret<String>,
    pub sender_email: String,
    pub recipient_email: String,
    pub starttls: bool,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl SmtpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct RateLimitSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_requests: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub window_seconds: u64,
}

impl RateLimitSettings {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_seconds)
    }

    pub fn limiter(&self) -> RateLimiter {
        RateLimiter::new(self.max_requests, self.window())
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct GeneralSettings {
    pub log_level: String,
}

/// Upper bound on the UTF-8 (or `\u` escaped) size of one grapheme we expect
/// in a submission. A family emoji joined with ZWJs is 25 bytes raw, 66 escaped.
const GRAPHEME_BYTES: usize = 128;

/// Default JSON body limit: a maximal name and message made of large
/// graphemes still fit, plus room for the email and the JSON framing.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize =
    (FullName::MAX_LENGTH + MessageBody::MAX_LENGTH) * GRAPHEME_BYTES + 4096;

/// Flat variable names used by earlier deployments, mapped onto settings
/// keys. The `APP_` form of a key takes precedence over its alias.
const LEGACY_VARIABLES: [(&str, &str); 7] = [
    ("SMTP_HOST", "smtp.host"),
    ("SMTP_PORT", "smtp.port"),
    ("SMTP_USER", "smtp.username"),
    ("SMTP_PASS", "smtp.password"),
    ("EMAIL_FROM", "smtp.sender_email"),
    ("EMAIL_TO", "smtp.recipient_email"),
    ("PORT", "application.port"),
];

/// Reads settings from the process environment. Built-in defaults cover
/// everything except the SMTP relay and the sender/recipient, whose absence
/// is an error.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let mut settings = config::Config::default();

    settings.set_default("application.host", "0.0.0.0")?;
    settings.set_default("application.port", 3000_i64)?;
    settings.set_default("application.trust_forwarded_for", false)?;
    settings.set_default("application.allowed_origins", "*")?;
    settings.set_default(
        "application.max_payload_bytes",
        DEFAULT_MAX_PAYLOAD_BYTES as i64,
    )?;
    settings.set_default("smtp.starttls", true)?;
    settings.set_default("smtp.timeout_milliseconds", 10_000_i64)?;
    settings.set_default("rate_limit.max_requests", 10_i64)?;
    settings.set_default("rate_limit.window_seconds", 900_i64)?;
    settings.set_default("general.log_level", "info")?;

    for (variable, key) in LEGACY_VARIABLES {
        if let Ok(value) = std::env::var(variable) {
            // Defaults are the lowest layer, the `APP_` source below still wins.
            settings.set_default(key, value)?;
        }
    }

    settings.merge(config::Environment::with_prefix("app").separator("__"))?;

    settings.try_into()
}
