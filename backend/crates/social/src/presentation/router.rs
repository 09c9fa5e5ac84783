//! Social Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::config::SocialConfig;
use crate::domain::repository::SocialRepository;
use crate::infra::postgres::PgSocialRepository;
use crate::presentation::handlers::{self, SocialAppState};

/// Create the social router with PostgreSQL repository
pub fn social_router(repo: PgSocialRepository, config: SocialConfig) -> Router {
    social_router_generic(repo, config)
}

/// Create a generic social router for any repository implementation
pub fn social_router_generic<R>(repo: R, config: SocialConfig) -> Router
where
    R: SocialRepository,
{
    let state = SocialAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/follows",
            post(handlers::follow::<R>).delete(handlers::unfollow::<R>),
        )
        .route(
            "/blocks",
            post(handlers::block::<R>).delete(handlers::unblock::<R>),
        )
        .route(
            "/likes",
            post(handlers::like::<R>).delete(handlers::unlike::<R>),
        )
        .route("/users/{id}/followers", get(handlers::list_followers::<R>))
        .route("/users/{id}/following", get(handlers::list_following::<R>))
        .route("/users/{id}/posts", get(handlers::list_posts_by_author::<R>))
        .route(
            "/posts",
            post(handlers::create_post::<R>).get(handlers::list_posts::<R>),
        )
        .route("/posts/{id}", get(handlers::get_post::<R>))
        .with_state(state)
}
