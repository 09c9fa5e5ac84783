//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;
use platform::reset_code::ResetCode;

use crate::domain::value_object::{email::Email, user_name::UserName};

/// User entity
///
/// Holds the credential alongside the profile; the hash never leaves the
/// crate through a DTO.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub name: UserName,
    /// Unique, lowercase
    pub email: Email,
    pub password_hash: HashedPassword,
    pub reset_code: Option<PendingResetCode>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for registration
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: UserName,
    pub email: Email,
    pub password_hash: HashedPassword,
}

/// Reset code waiting to be redeemed
#[derive(Debug, Clone, Copy)]
pub struct PendingResetCode {
    pub code: ResetCode,
    pub expires_at: DateTime<Utc>,
    /// Wrong guesses recorded against this code
    pub failed_attempts: u32,
}

/// Why a submitted reset code was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetCodeCheck {
    Valid,
    Mismatch,
    Expired,
}

impl PendingResetCode {
    pub fn new(code: ResetCode, expires_at: DateTime<Utc>) -> Self {
        Self {
            code,
            expires_at,
            failed_attempts: 0,
        }
    }

    /// A mismatching code is reported before expiry so that an expired
    /// code cannot be probed.
    pub fn check(&self, candidate: &ResetCode, now: DateTime<Utc>) -> ResetCodeCheck {
        if !self.code.matches(candidate) {
            ResetCodeCheck::Mismatch
        } else if now >= self.expires_at {
            ResetCodeCheck::Expired
        } else {
            ResetCodeCheck::Valid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_reset_code_check() {
        let now = Utc::now();
        let pending = PendingResetCode::new(ResetCode::new(4321).unwrap(), now + Duration::minutes(10));

        assert_eq!(
            pending.check(&ResetCode::new(4321).unwrap(), now),
            ResetCodeCheck::Valid
        );
        assert_eq!(
            pending.check(&ResetCode::new(1234).unwrap(), now),
            ResetCodeCheck::Mismatch
        );
        assert_eq!(
            pending.check(&ResetCode::new(4321).unwrap(), now + Duration::minutes(11)),
            ResetCodeCheck::Expired
        );
        assert_eq!(
            pending.check(&ResetCode::new(1234).unwrap(), now + Duration::minutes(11)),
            ResetCodeCheck::Mismatch
        );
    }
}
