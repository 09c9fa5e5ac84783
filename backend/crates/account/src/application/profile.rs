//! Update Profile Use Case
//!
//! Changes a user's name and/or email. Fields left out keep their value.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AccountError, AccountResult};

/// Update Profile input
pub struct UpdateProfileInput {
    pub user_id: UserId,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Update Profile Use Case
pub struct UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: UpdateProfileInput) -> AccountResult<User> {
        let user = self
            .user_repo
            .find_by_id(input.user_id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        let name = match input.name {
            Some(raw) => UserName::new(raw)?,
            None => user.name.clone(),
        };
        let email = match input.email {
            Some(raw) => Email::new(raw)?,
            None => user.email.clone(),
        };

        if email != user.email {
            // The unique index still decides races
            if let Some(owner) = self.user_repo.find_by_email(&email).await? {
                if owner.user_id != user.user_id {
                    return Err(AccountError::EmailTaken);
                }
            }
        }

        let updated = self
            .user_repo
            .update_profile(user.user_id, &name, &email)
            .await?;

        tracing::info!(
            user_id = %updated.user_id,
            email_changed = email != user.email,
            "Profile updated"
        );

        Ok(updated)
    }
}
