//! Credential Use Cases
//!
//! Checking a password and changing it. No session or token is issued.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AccountConfig;
use crate::application::parse_password;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AccountError, AccountResult};

/// Check Credentials Use Case
pub struct CheckCredentialsUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AccountConfig>,
}

impl<U> CheckCredentialsUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AccountConfig>) -> Self {
        Self { user_repo, config }
    }

    /// The matching user, or `InvalidCredentials` for any mismatch
    pub async fn execute(&self, email: String, password: String) -> AccountResult<User> {
        let Ok(email) = Email::new(email) else {
            return Err(AccountError::InvalidCredentials);
        };
        let Ok(password) = parse_password(password) else {
            return Err(AccountError::InvalidCredentials);
        };

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !user.password_hash.verify(&password, self.config.pepper()) {
            return Err(AccountError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.user_id, "Credentials verified");

        Ok(user)
    }
}

/// Change Password input
pub struct ChangePasswordInput {
    pub user_id: UserId,
    pub old_password: String,
    pub new_password: String,
}

/// Change Password Use Case
pub struct ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AccountConfig>,
}

impl<U> ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AccountConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: ChangePasswordInput) -> AccountResult<()> {
        let user = self
            .user_repo
            .find_by_id(input.user_id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        let old_password =
            parse_password(input.old_password).map_err(|_| AccountError::InvalidCredentials)?;
        if !user.password_hash.verify(&old_password, self.config.pepper()) {
            return Err(AccountError::InvalidCredentials);
        }

        let new_hash = parse_password(input.new_password)?
            .hash(self.config.pepper())
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        self.user_repo
            .update_password(user.user_id, &new_hash)
            .await?;

        tracing::info!(user_id = %user.user_id, "Password changed");

        Ok(())
    }
}
