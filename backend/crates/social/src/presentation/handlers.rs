//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::id::{PostId, UserId};

use crate::application::block::{BlockUseCase, UnblockUseCase};
use crate::application::config::SocialConfig;
use crate::application::follow::{FollowUseCase, UnfollowUseCase};
use crate::application::like::{LikeUseCase, UnlikeUseCase};
use crate::application::listing::ListRelationsUseCase;
use crate::application::post::{CreatePostInput, CreatePostUseCase, PostQueryUseCase};
use crate::domain::repository::{SocialRepository, UserDirectory};
use crate::error::{SocialError, SocialResult};
use crate::presentation::dto::{
    BlockRequest, CreatePostRequest, FollowRequest, FollowersResponse, FollowingResponse,
    LikeRequest, OutcomeReply, PostResponse,
};

/// Shared state for social handlers
#[derive(Clone)]
pub struct SocialAppState<R>
where
    R: SocialRepository,
{
    pub repo: Arc<R>,
    pub config: Arc<SocialConfig>,
}

/// 404 unless every id names a registered user
async fn ensure_users_exist<R>(repo: &R, ids: &[UserId]) -> SocialResult<()>
where
    R: SocialRepository,
{
    for id in ids {
        if !repo.user_exists(*id).await? {
            tracing::debug!(user_id = %id, "Unknown user in relationship request");
            return Err(SocialError::UserNotFound);
        }
    }
    Ok(())
}

/// POST /api/follows
pub async fn follow<R>(
    State(state): State<SocialAppState<R>>,
    Json(req): Json<FollowRequest>,
) -> SocialResult<OutcomeReply>
where
    R: SocialRepository,
{
    ensure_users_exist(state.repo.as_ref(), &[req.follower_id, req.followee_id]).await?;

    let outcome = FollowUseCase::new(state.repo.clone())
        .execute(req.follower_id, req.followee_id)
        .await?;

    Ok(OutcomeReply::new(outcome))
}

/// DELETE /api/follows
pub async fn unfollow<R>(
    State(state): State<SocialAppState<R>>,
    Json(req): Json<FollowRequest>,
) -> SocialResult<OutcomeReply>
where
    R: SocialRepository,
{
    ensure_users_exist(state.repo.as_ref(), &[req.follower_id, req.followee_id]).await?;

    let outcome = UnfollowUseCase::new(state.repo.clone())
        .execute(req.follower_id, req.followee_id)
        .await?;

    Ok(OutcomeReply::new(outcome))
}

/// POST /api/blocks
pub async fn block<R>(
    State(state): State<SocialAppState<R>>,
    Json(req): Json<BlockRequest>,
) -> SocialResult<OutcomeReply>
where
    R: SocialRepository,
{
    ensure_users_exist(state.repo.as_ref(), &[req.blocker_id, req.blocked_id]).await?;

    let outcome = BlockUseCase::new(state.repo.clone())
        .execute(req.blocker_id, req.blocked_id)
        .await?;

    Ok(OutcomeReply::new(outcome))
}

/// DELETE /api/blocks
pub async fn unblock<R>(
    State(state): State<SocialAppState<R>>,
    Json(req): Json<BlockRequest>,
) -> SocialResult<OutcomeReply>
where
    R: SocialRepository,
{
    ensure_users_exist(state.repo.as_ref(), &[req.blocker_id, req.blocked_id]).await?;

    let outcome = UnblockUseCase::new(state.repo.clone())
        .execute(req.blocker_id, req.blocked_id)
        .await?;

    Ok(OutcomeReply::new(outcome))
}

/// POST /api/likes
pub async fn like<R>(
    State(state): State<SocialAppState<R>>,
    Json(req): Json<LikeRequest>,
) -> SocialResult<OutcomeReply>
where
    R: SocialRepository,
{
    ensure_users_exist(state.repo.as_ref(), &[req.user_id]).await?;

    let owner = PostQueryUseCase::new(state.repo.clone())
        .owner_of(req.post_id)
        .await?;

    let outcome = LikeUseCase::new(state.repo.clone())
        .execute(req.user_id, req.post_id, owner)
        .await?;

    Ok(OutcomeReply::new(outcome))
}

/// DELETE /api/likes
pub async fn unlike<R>(
    State(state): State<SocialAppState<R>>,
    Json(req): Json<LikeRequest>,
) -> SocialResult<OutcomeReply>
where
    R: SocialRepository,
{
    ensure_users_exist(state.repo.as_ref(), &[req.user_id]).await?;

    let outcome = UnlikeUseCase::new(state.repo.clone())
        .execute(req.user_id, req.post_id)
        .await?;

    Ok(OutcomeReply::new(outcome))
}

/// GET /api/users/{id}/followers
pub async fn list_followers<R>(
    State(state): State<SocialAppState<R>>,
    Path(user_id): Path<UserId>,
) -> SocialResult<Json<FollowersResponse>>
where
    R: SocialRepository,
{
    ensure_users_exist(state.repo.as_ref(), &[user_id]).await?;

    let followers = ListRelationsUseCase::new(state.repo.clone())
        .followers(user_id)
        .await?;

    Ok(Json(FollowersResponse {
        user_id,
        followers: followers.into_iter().collect(),
    }))
}

/// GET /api/users/{id}/following
pub async fn list_following<R>(
    State(state): State<SocialAppState<R>>,
    Path(user_id): Path<UserId>,
) -> SocialResult<Json<FollowingResponse>>
where
    R: SocialRepository,
{
    ensure_users_exist(state.repo.as_ref(), &[user_id]).await?;

    let following = ListRelationsUseCase::new(state.repo.clone())
        .following(user_id)
        .await?;

    Ok(Json(FollowingResponse {
        user_id,
        following: following.into_iter().collect(),
    }))
}

/// POST /api/posts
pub async fn create_post<R>(
    State(state): State<SocialAppState<R>>,
    Json(req): Json<CreatePostRequest>,
) -> SocialResult<(StatusCode, Json<PostResponse>)>
where
    R: SocialRepository,
{
    let use_case =
        CreatePostUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let post = use_case
        .execute(CreatePostInput {
            user_id: req.user_id,
            title: req.title,
            content: req.content,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(post.into())))
}

/// GET /api/posts
pub async fn list_posts<R>(
    State(state): State<SocialAppState<R>>,
) -> SocialResult<Json<Vec<PostResponse>>>
where
    R: SocialRepository,
{
    let posts = PostQueryUseCase::new(state.repo.clone()).list().await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// GET /api/posts/{id}
pub async fn get_post<R>(
    State(state): State<SocialAppState<R>>,
    Path(post_id): Path<PostId>,
) -> SocialResult<Json<PostResponse>>
where
    R: SocialRepository,
{
    let post = PostQueryUseCase::new(state.repo.clone()).get(post_id).await?;
    Ok(Json(post.into()))
}

/// GET /api/users/{id}/posts
pub async fn list_posts_by_author<R>(
    State(state): State<SocialAppState<R>>,
    Path(user_id): Path<UserId>,
) -> SocialResult<Json<Vec<PostResponse>>>
where
    R: SocialRepository,
{
    ensure_users_exist(state.repo.as_ref(), &[user_id]).await?;

    let posts = PostQueryUseCase::new(state.repo.clone())
        .list_by_author(user_id)
        .await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}
