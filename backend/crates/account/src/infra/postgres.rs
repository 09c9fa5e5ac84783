//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;
use platform::reset_code::ResetCode;
use sqlx::PgPool;

use crate::domain::entity::user::{NewUser, PendingResetCode, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AccountError, AccountResult};

const USER_COLUMNS: &str = "user_id, name, email, password_hash, reset_code, \
                            reset_code_expires_at, reset_code_attempts, created_at, updated_at";

/// `EmailTaken` for a unique violation, otherwise a database error
fn email_conflict(e: sqlx::Error) -> AccountError {
    let duplicate = matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation());
    if duplicate {
        AccountError::EmailTaken
    } else {
        AccountError::Database(e)
    }
}

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgAccountRepository {
    async fn create(&self, user: &NewUser) -> AccountResult<User> {
        let sql = format!(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) \
             RETURNING {USER_COLUMNS}"
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.name.as_str())
            .bind(user.email.as_str())
            .bind(user.password_hash.as_phc_string())
            .fetch_one(&self.pool)
            .await
            .map_err(email_conflict)?;

        row.into_user()
    }

    async fn find_by_id(&self, user_id: UserId) -> AccountResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.get())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn list_all(&self) -> AccountResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY user_id");

        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        name: &UserName,
        email: &Email,
    ) -> AccountResult<User> {
        let sql = format!(
            "UPDATE users SET name = $2, email = $3, updated_at = now() \
             WHERE user_id = $1 RETURNING {USER_COLUMNS}"
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.get())
            .bind(name.as_str())
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(email_conflict)?
            .ok_or(AccountError::UserNotFound)?;

        row.into_user()
    }

    async fn update_password(&self, user_id: UserId, hash: &HashedPassword) -> AccountResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2,
                reset_code = NULL,
                reset_code_expires_at = NULL,
                reset_code_attempts = 0,
                updated_at = now()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.get())
        .bind(hash.as_phc_string())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(AccountError::UserNotFound);
        }
        Ok(())
    }

    async fn store_reset_code(
        &self,
        user_id: UserId,
        code: &PendingResetCode,
    ) -> AccountResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE users
            SET reset_code = $2,
                reset_code_expires_at = $3,
                reset_code_attempts = 0,
                updated_at = now()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.get())
        .bind(i32::from(code.code.value()))
        .bind(code.expires_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(AccountError::UserNotFound);
        }
        Ok(())
    }

    async fn redeem_reset_code(
        &self,
        user_id: UserId,
        code: &ResetCode,
        now: DateTime<Utc>,
        hash: &HashedPassword,
    ) -> AccountResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $4,
                reset_code = NULL,
                reset_code_expires_at = NULL,
                reset_code_attempts = 0,
                updated_at = now()
            WHERE user_id = $1
              AND reset_code = $2
              AND reset_code_expires_at > $3
            "#,
        )
        .bind(user_id.get())
        .bind(i32::from(code.value()))
        .bind(now)
        .bind(hash.as_phc_string())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated == 1)
    }

    async fn record_reset_mismatch(
        &self,
        user_id: UserId,
        max_attempts: u32,
    ) -> AccountResult<bool> {
        let max_attempts = i32::try_from(max_attempts).unwrap_or(i32::MAX);

        // SET expressions read the row as it was before the update
        let discarded = sqlx::query_scalar::<_, bool>(
            r#"
            UPDATE users
            SET reset_code_attempts = CASE
                    WHEN reset_code_attempts + 1 >= $2 THEN 0
                    ELSE reset_code_attempts + 1
                END,
                reset_code = CASE
                    WHEN reset_code_attempts + 1 >= $2 THEN NULL
                    ELSE reset_code
                END,
                reset_code_expires_at = CASE
                    WHEN reset_code_attempts + 1 >= $2 THEN NULL
                    ELSE reset_code_expires_at
                END,
                updated_at = now()
            WHERE user_id = $1 AND reset_code IS NOT NULL
            RETURNING reset_code IS NULL
            "#,
        )
        .bind(user_id.get())
        .bind(max_attempts)
        .fetch_optional(&self.pool)
        .await?;

        Ok(discarded.unwrap_or(false))
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    name: String,
    email: String,
    password_hash: String,
    reset_code: Option<i32>,
    reset_code_expires_at: Option<DateTime<Utc>>,
    reset_code_attempts: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AccountResult<User> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AccountError::Internal(format!("user {}: {e}", self.user_id)))?;

        let reset_code = match (self.reset_code, self.reset_code_expires_at) {
            (Some(code), Some(expires_at)) => {
                let code = u16::try_from(code)
                    .ok()
                    .and_then(|c| ResetCode::new(c).ok())
                    .ok_or_else(|| {
                        AccountError::Internal(format!("user {}: corrupt reset code", self.user_id))
                    })?;
                Some(PendingResetCode {
                    code,
                    expires_at,
                    failed_attempts: u32::try_from(self.reset_code_attempts).unwrap_or(0),
                })
            }
            _ => None,
        };

        Ok(User {
            user_id: UserId::new(self.user_id),
            name: UserName::from_db(self.name),
            email: Email::from_db(self.email),
            password_hash,
            reset_code,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
