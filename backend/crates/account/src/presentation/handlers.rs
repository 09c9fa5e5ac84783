//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::id::UserId;

use crate::application::config::AccountConfig;
use crate::application::credentials::{
    ChangePasswordInput, ChangePasswordUseCase, CheckCredentialsUseCase,
};
use crate::application::profile::{UpdateProfileInput, UpdateProfileUseCase};
use crate::application::query::UserQueryUseCase;
use crate::application::register::{RegisterInput, RegisterUseCase};
use crate::application::reset::{IssueResetCodeUseCase, ResetPasswordInput, ResetPasswordUseCase};
use crate::domain::repository::UserRepository;
use crate::error::AccountResult;
use crate::presentation::dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest, ResetCodeResponse,
    ResetPasswordRequest, UpdateProfileRequest, UserResponse,
};

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AccountConfig>,
}

/// POST /api/users
pub async fn register<R>(
    State(state): State<AccountAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AccountResult<(StatusCode, Json<UserResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let user = use_case
        .execute(RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/users
pub async fn list_users<R>(
    State(state): State<AccountAppState<R>>,
) -> AccountResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let users = UserQueryUseCase::new(state.repo.clone()).list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/users/{id}
pub async fn get_user<R>(
    State(state): State<AccountAppState<R>>,
    Path(user_id): Path<UserId>,
) -> AccountResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = UserQueryUseCase::new(state.repo.clone()).get(user_id).await?;
    Ok(Json(user.into()))
}

/// PATCH /api/users/{id}
pub async fn update_profile<R>(
    State(state): State<AccountAppState<R>>,
    Path(user_id): Path<UserId>,
    Json(req): Json<UpdateProfileRequest>,
) -> AccountResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = UpdateProfileUseCase::new(state.repo.clone())
        .execute(UpdateProfileInput {
            user_id,
            name: req.name,
            email: req.email,
        })
        .await?;

    Ok(Json(user.into()))
}

/// POST /api/users/login
pub async fn login<R>(
    State(state): State<AccountAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AccountResult<Json<LoginResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = CheckCredentialsUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.execute(req.email, req.password).await?;

    Ok(Json(LoginResponse {
        user_id: user.user_id,
        message: "Login successful",
    }))
}

/// PATCH /api/users/{id}/password
pub async fn change_password<R>(
    State(state): State<AccountAppState<R>>,
    Path(user_id): Path<UserId>,
    Json(req): Json<ChangePasswordRequest>,
) -> AccountResult<StatusCode>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = ChangePasswordUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .execute(ChangePasswordInput {
            user_id,
            old_password: req.old_password,
            new_password: req.new_password,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/users/{id}/reset-code
pub async fn issue_reset_code<R>(
    State(state): State<AccountAppState<R>>,
    Path(user_id): Path<UserId>,
) -> AccountResult<(StatusCode, Json<ResetCodeResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = IssueResetCodeUseCase::new(state.repo.clone(), state.config.clone());
    let pending = use_case.execute(user_id).await?;

    let code = state
        .config
        .expose_reset_code
        .then(|| pending.code.value());

    Ok((
        StatusCode::CREATED,
        Json(ResetCodeResponse {
            expires_at: pending.expires_at,
            code,
        }),
    ))
}

/// POST /api/users/{id}/password/reset
pub async fn reset_password<R>(
    State(state): State<AccountAppState<R>>,
    Path(user_id): Path<UserId>,
    Json(req): Json<ResetPasswordRequest>,
) -> AccountResult<StatusCode>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = ResetPasswordUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .execute(ResetPasswordInput {
            user_id,
            code: req.code,
            new_password: req.new_password,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
