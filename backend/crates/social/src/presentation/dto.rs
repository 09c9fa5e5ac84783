//! API DTOs (Data Transfer Objects)

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::outcome::{OperationOutcome, Outcome};
use crate::domain::post::Post;

/// Request for POST/DELETE /api/follows
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    pub follower_id: UserId,
    pub followee_id: UserId,
}

/// Request for POST/DELETE /api/blocks
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRequest {
    pub blocker_id: UserId,
    pub blocked_id: UserId,
}

/// Request for POST/DELETE /api/likes
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    pub user_id: UserId,
    pub post_id: PostId,
}

/// Body of every relationship response
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeResponse {
    pub outcome: Outcome,
    pub message: &'static str,
}

/// Relationship result rendered with its status code
#[derive(Debug, Clone)]
pub struct OutcomeReply(pub OutcomeResponse);

impl OutcomeReply {
    pub fn new<O: OperationOutcome>(outcome: O) -> Self {
        Self(OutcomeResponse {
            message: outcome.message(),
            outcome: outcome.into(),
        })
    }
}

impl IntoResponse for OutcomeReply {
    fn into_response(self) -> Response {
        (outcome_status(self.0.outcome), Json(self.0)).into_response()
    }
}

pub fn outcome_status(outcome: Outcome) -> StatusCode {
    match outcome {
        Outcome::Created => StatusCode::CREATED,
        Outcome::Removed => StatusCode::OK,
        Outcome::AlreadyExists | Outcome::AlreadyBlocked | Outcome::AlreadyLiked => {
            StatusCode::CONFLICT
        }
        Outcome::Blocked => StatusCode::FORBIDDEN,
        Outcome::NotFollowing
        | Outcome::NotBlocked
        | Outcome::NotLiked
        | Outcome::TargetMissing => StatusCode::NOT_FOUND,
        Outcome::SelfFollow | Outcome::SelfBlock => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

/// Response for GET /api/users/{id}/followers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowersResponse {
    pub user_id: UserId,
    pub followers: Vec<UserId>,
}

/// Response for GET /api/users/{id}/following
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowingResponse {
    pub user_id: UserId,
    pub following: Vec<UserId>,
}

/// Request for POST /api/posts
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub user_id: UserId,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub post_id: PostId,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            post_id: post.post_id,
            user_id: post.user_id,
            title: post.title,
            content: post.content,
            created_at: post.created_at,
        }
    }
}
