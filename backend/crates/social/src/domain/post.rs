//! Post Entity

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub post_id: PostId,
    /// Author, also the owner for like checks
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Validated input for a new post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub user_id: UserId,
    pub title: String,
    pub content: String,
}
