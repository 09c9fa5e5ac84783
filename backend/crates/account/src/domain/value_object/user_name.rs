//! User Name Value Object
//!
//! A display name, not a handle: any script is allowed and it need not be
//! unique.
//!
//! ## Invariants
//! - NFKC normalized, surrounding whitespace trimmed
//! - Length: 1 to 100 characters
//! - No control characters

use std::fmt;

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::error::AccountError;

pub const USER_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountError> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let name = normalized.trim();

        if name.is_empty() {
            return Err(AccountError::InvalidName("name cannot be empty".into()));
        }

        if name.chars().count() > USER_NAME_MAX_LENGTH {
            return Err(AccountError::InvalidName(format!(
                "name must be at most {USER_NAME_MAX_LENGTH} characters"
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(AccountError::InvalidName(
                "name contains control characters".into(),
            ));
        }

        Ok(Self(name.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
