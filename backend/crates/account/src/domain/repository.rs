//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;
use platform::reset_code::ResetCode;

use crate::domain::entity::user::{NewUser, PendingResetCode, User};
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::AccountResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user; a duplicate email yields `AccountError::EmailTaken`
    async fn create(&self, user: &NewUser) -> AccountResult<User>;

    async fn find_by_id(&self, user_id: UserId) -> AccountResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>>;

    /// Ordered by id
    async fn list_all(&self) -> AccountResult<Vec<User>>;

    /// Replace name and email; an email owned by another user yields
    /// `AccountError::EmailTaken`
    async fn update_profile(
        &self,
        user_id: UserId,
        name: &UserName,
        email: &Email,
    ) -> AccountResult<User>;

    /// Replace the password hash and drop any pending reset code
    async fn update_password(&self, user_id: UserId, hash: &HashedPassword) -> AccountResult<()>;

    /// Store a reset code, replacing any earlier one
    async fn store_reset_code(&self, user_id: UserId, code: &PendingResetCode)
    -> AccountResult<()>;

    /// Set the password and clear the code in one step, only if `code` is
    /// still pending and unexpired at `now`. Returns false otherwise.
    async fn redeem_reset_code(
        &self,
        user_id: UserId,
        code: &ResetCode,
        now: DateTime<Utc>,
        hash: &HashedPassword,
    ) -> AccountResult<bool>;

    /// Count a wrong guess against the pending code and discard the code
    /// once `max_attempts` is reached. Returns true when it was discarded.
    async fn record_reset_mismatch(&self, user_id: UserId, max_attempts: u32)
    -> AccountResult<bool>;
}
