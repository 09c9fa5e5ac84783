//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.

pub mod config;
pub mod credentials;
pub mod profile;
pub mod query;
pub mod register;
pub mod reset;

use platform::password::ClearTextPassword;

use crate::error::{AccountError, AccountResult};

/// Apply the password policy to user input
pub(crate) fn parse_password(raw: String) -> AccountResult<ClearTextPassword> {
    ClearTextPassword::new(raw).map_err(|e| AccountError::PasswordValidation(e.to_string()))
}
