//! Account Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::application::config::AccountConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgAccountRepository;
use crate::presentation::handlers::{self, AccountAppState};

/// Create the account router with PostgreSQL repository
pub fn account_router(repo: PgAccountRepository, config: AccountConfig) -> Router {
    account_router_generic(repo, config)
}

/// Create a generic account router for any repository implementation
pub fn account_router_generic<R>(repo: R, config: AccountConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AccountAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/users",
            post(handlers::register::<R>).get(handlers::list_users::<R>),
        )
        .route("/users/login", post(handlers::login::<R>))
        .route(
            "/users/{id}",
            get(handlers::get_user::<R>).patch(handlers::update_profile::<R>),
        )
        .route(
            "/users/{id}/password",
            patch(handlers::change_password::<R>),
        )
        .route(
            "/users/{id}/reset-code",
            post(handlers::issue_reset_code::<R>),
        )
        .route(
            "/users/{id}/password/reset",
            post(handlers::reset_password::<R>),
        )
        .with_state(state)
}
