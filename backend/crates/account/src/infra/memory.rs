//! In-memory Repository Implementation

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;
use platform::reset_code::ResetCode;
use tokio::sync::Mutex;

use crate::domain::entity::user::{NewUser, PendingResetCode, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AccountError, AccountResult};

#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    users: Arc<Mutex<BTreeMap<UserId, User>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the expiry of a pending reset code
    pub async fn expire_reset_code(&self, user_id: UserId) {
        if let Some(pending) = self
            .users
            .lock()
            .await
            .get_mut(&user_id)
            .and_then(|u| u.reset_code.as_mut())
        {
            pending.expires_at = Utc::now() - chrono::Duration::seconds(1);
        }
    }
}

impl UserRepository for InMemoryAccountRepository {
    async fn create(&self, user: &NewUser) -> AccountResult<User> {
        let mut users = self.users.lock().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AccountError::EmailTaken);
        }

        let next_id = users.keys().next_back().map_or(1, |id| id.get() + 1);
        let now = Utc::now();
        let created = User {
            user_id: UserId::new(next_id),
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            reset_code: None,
            created_at: now,
            updated_at: now,
        };
        users.insert(created.user_id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, user_id: UserId) -> AccountResult<Option<User>> {
        Ok(self.users.lock().await.get(&user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.values().find(|u| &u.email == email).cloned())
    }

    async fn list_all(&self) -> AccountResult<Vec<User>> {
        Ok(self.users.lock().await.values().cloned().collect())
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        name: &UserName,
        email: &Email,
    ) -> AccountResult<User> {
        let mut users = self.users.lock().await;

        if users
            .values()
            .any(|u| u.user_id != user_id && &u.email == email)
        {
            return Err(AccountError::EmailTaken);
        }

        let user = users.get_mut(&user_id).ok_or(AccountError::UserNotFound)?;
        user.name = name.clone();
        user.email = email.clone();
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn update_password(&self, user_id: UserId, hash: &HashedPassword) -> AccountResult<()> {
        let mut users = self.users.lock().await;
        let user = users.get_mut(&user_id).ok_or(AccountError::UserNotFound)?;
        user.password_hash = hash.clone();
        user.reset_code = None;
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn store_reset_code(
        &self,
        user_id: UserId,
        code: &PendingResetCode,
    ) -> AccountResult<()> {
        let mut users = self.users.lock().await;
        let user = users.get_mut(&user_id).ok_or(AccountError::UserNotFound)?;
        user.reset_code = Some(*code);
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn redeem_reset_code(
        &self,
        user_id: UserId,
        code: &ResetCode,
        now: DateTime<Utc>,
        hash: &HashedPassword,
    ) -> AccountResult<bool> {
        let mut users = self.users.lock().await;
        let user = users.get_mut(&user_id).ok_or(AccountError::UserNotFound)?;

        let redeemable = user
            .reset_code
            .is_some_and(|p| p.code.matches(code) && now < p.expires_at);
        if !redeemable {
            return Ok(false);
        }

        user.password_hash = hash.clone();
        user.reset_code = None;
        user.updated_at = now;
        Ok(true)
    }

    async fn record_reset_mismatch(
        &self,
        user_id: UserId,
        max_attempts: u32,
    ) -> AccountResult<bool> {
        let mut users = self.users.lock().await;
        let user = users.get_mut(&user_id).ok_or(AccountError::UserNotFound)?;

        let Some(pending) = user.reset_code.as_mut() else {
            return Ok(false);
        };

        pending.failed_attempts += 1;
        if pending.failed_attempts >= max_attempts {
            user.reset_code = None;
            user.updated_at = Utc::now();
            return Ok(true);
        }
        Ok(false)
    }
}
