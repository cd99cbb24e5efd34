use std::time::Duration;

use crate::adapters::word_source::DEFAULT_WORD_API_URL;
use crate::invocation::HandlerKind;

pub const DEFAULT_WORD_TIMEOUT_MS: u64 = 4_444;
pub const DEFAULT_CALLBACK_TIMEOUT_MS: u64 = 10_000;

/// Settings every handler needs to reach the callback URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackConfig {
    pub timeout: Duration,
}

impl Default for CallbackConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_CALLBACK_TIMEOUT_MS),
        }
    }
}

/// Settings only the random word handler reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordApiConfig {
    pub url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigError {}

pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl CallbackConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            timeout: millis(
                "CALLBACK_TIMEOUT_MS",
                read(&lookup, "CALLBACK_TIMEOUT_MS"),
                DEFAULT_CALLBACK_TIMEOUT_MS,
            )?,
        })
    }
}

impl WordApiConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            url: read(&lookup, "RANDOM_WORD_API_URL")
                .unwrap_or_else(|| DEFAULT_WORD_API_URL.to_string()),
            timeout: millis(
                "RANDOM_WORD_TIMEOUT_MS",
                read(&lookup, "RANDOM_WORD_TIMEOUT_MS"),
                DEFAULT_WORD_TIMEOUT_MS,
            )?,
        })
    }
}

/// Handler selection for the combined runtime binary. The per-handler
/// binaries never read `CUSTOM_RESOURCE_HANDLER`.
pub fn handler_kind_from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<HandlerKind, ConfigError> {
    match read(&lookup, "CUSTOM_RESOURCE_HANDLER") {
        Some(value) => value.parse(),
        None => Ok(HandlerKind::Skeleton),
    }
}

/// Blank values count as unset.
fn read(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn millis(key: &str, value: Option<String>, default: u64) -> Result<Duration, ConfigError> {
    let Some(raw) = value else {
        return Ok(Duration::from_millis(default));
    };
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::new(format!("{key} must be greater than zero"))),
        Ok(ms) => Ok(Duration::from_millis(ms)),
        Err(error) => Err(ConfigError::new(format!(
            "{key} must be a whole number of milliseconds, got '{raw}': {error}"
        ))),
    }
}
