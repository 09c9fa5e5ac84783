//! Environment Configuration
//!
//! Typed reads of environment variables with defaults. The lookup is
//! injectable so configuration parsing can be tested without touching
//! the process environment.

use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(String),

    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

/// Source of configuration values
pub struct Env<F = fn(&str) -> Option<String>> {
    lookup: F,
}

impl Env {
    /// Read from the process environment
    pub fn process() -> Self {
        Self {
            lookup: |key: &str| std::env::var(key).ok(),
        }
    }
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn from_fn(lookup: F) -> Self {
        Self { lookup }
    }

    /// Trimmed value, `None` when unset or blank
    pub fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::Missing(key.to_string()))
    }

    /// Parse the value, falling back to `default` when unset
    pub fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr + Display,
        T::Err: Display,
    {
        match self.optional(key) {
            None => {
                tracing::debug!(key, default = %default, "Using default configuration value");
                Ok(default)
            }
            Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
                key: key.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            }),
        }
    }

    /// Boolean switch accepting `1/0`, `true/false`, `yes/no`, `on/off`
    pub fn flag(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        let Some(raw) = self.optional(key) else {
            return Ok(default);
        };

        match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid {
                key: key.to_string(),
                value: raw,
                reason: "expected a boolean".to_string(),
            }),
        }
    }
}
