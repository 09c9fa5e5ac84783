//! Password Reset Use Cases
//!
//! A four digit code is issued and stored on the user row with an expiry.
//! Redeeming it sets a new password and clears the code.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;
use platform::reset_code::ResetCode;

use crate::application::config::AccountConfig;
use crate::application::parse_password;
use crate::domain::entity::user::{PendingResetCode, ResetCodeCheck};
use crate::domain::repository::UserRepository;
use crate::error::{AccountError, AccountResult};

/// Issue Reset Code Use Case
pub struct IssueResetCodeUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AccountConfig>,
}

impl<U> IssueResetCodeUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AccountConfig>) -> Self {
        Self { user_repo, config }
    }

    /// The caller decides whether the code may be shown to anyone
    pub async fn execute(&self, user_id: UserId) -> AccountResult<PendingResetCode> {
        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(AccountError::UserNotFound);
        }

        let expires_at = Utc::now()
            .checked_add_signed(self.config.reset_code_ttl())
            .ok_or_else(|| AccountError::Internal("reset code TTL out of range".into()))?;

        let pending = PendingResetCode::new(ResetCode::generate(), expires_at);
        self.user_repo.store_reset_code(user_id, &pending).await?;

        tracing::info!(
            user_id = %user_id,
            expires_at = %pending.expires_at,
            "Reset code issued"
        );

        Ok(pending)
    }
}

/// Reset Password input
pub struct ResetPasswordInput {
    pub user_id: UserId,
    pub code: u16,
    pub new_password: String,
}

/// Reset Password Use Case
pub struct ResetPasswordUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AccountConfig>,
}

impl<U> ResetPasswordUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AccountConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: ResetPasswordInput) -> AccountResult<()> {
        let user = self
            .user_repo
            .find_by_id(input.user_id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        let candidate = ResetCode::new(input.code).map_err(|_| AccountError::InvalidResetCode)?;
        let pending = user.reset_code.ok_or(AccountError::InvalidResetCode)?;

        match pending.check(&candidate, Utc::now()) {
            ResetCodeCheck::Valid => {}
            ResetCodeCheck::Mismatch => {
                let discarded = self
                    .user_repo
                    .record_reset_mismatch(user.user_id, self.config.max_reset_attempts)
                    .await?;
                if discarded {
                    tracing::warn!(
                        user_id = %user.user_id,
                        "Reset code discarded after repeated mismatches"
                    );
                }
                return Err(AccountError::InvalidResetCode);
            }
            ResetCodeCheck::Expired => return Err(AccountError::ResetCodeExpired),
        }

        let new_hash = parse_password(input.new_password)?
            .hash(self.config.pepper())
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        // A concurrent redemption may have consumed the code since it was read
        let redeemed = self
            .user_repo
            .redeem_reset_code(user.user_id, &candidate, Utc::now(), &new_hash)
            .await?;
        if !redeemed {
            return Err(AccountError::InvalidResetCode);
        }

        tracing::info!(user_id = %user.user_id, "Password reset with code");

        Ok(())
    }
}
