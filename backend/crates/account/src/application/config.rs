//! Application Configuration
//!
//! Configuration for the account application layer.

use std::time::Duration;

/// Account application configuration
#[derive(Debug, Clone)]
pub struct AccountConfig {
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// How long an issued reset code stays redeemable
    pub reset_code_ttl: Duration,
    /// Wrong guesses after which a pending reset code is discarded
    pub max_reset_attempts: u32,
    /// Echo issued reset codes in the HTTP response (no delivery channel exists)
    pub expose_reset_code: bool,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            password_pepper: None,
            reset_code_ttl: Duration::from_secs(10 * 60),
            max_reset_attempts: 5,
            expose_reset_code: false,
        }
    }
}

impl AccountConfig {
    /// Create config for development (reset codes are echoed)
    pub fn development() -> Self {
        Self {
            expose_reset_code: true,
            ..Default::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    pub fn reset_code_ttl(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.reset_code_ttl).unwrap_or(chrono::Duration::MAX)
    }
}
