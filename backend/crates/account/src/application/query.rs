//! User Query Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AccountError, AccountResult};

pub struct UserQueryUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UserQueryUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn get(&self, user_id: UserId) -> AccountResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)
    }

    pub async fn list(&self) -> AccountResult<Vec<User>> {
        self.user_repo.list_all().await
    }
}
