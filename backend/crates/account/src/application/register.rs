//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::parse_password;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AccountError, AccountResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AccountConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AccountConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AccountResult<User> {
        let name = UserName::new(&input.name)?;
        let email = Email::new(input.email)?;

        // Cheap check first; the unique index still decides races
        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AccountError::EmailTaken);
        }

        let password = parse_password(input.password)?;
        let password_hash = password
            .hash(self.config.pepper())
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        let user = self
            .user_repo
            .create(&NewUser {
                name,
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(user)
    }
}
