//! Post Use Cases

use std::sync::Arc;

use kernel::id::{PostId, UserId};

use crate::application::config::SocialConfig;
use crate::domain::post::Post;
use crate::domain::repository::{PostRepository, UserDirectory};
use crate::domain::services::validate_post;
use crate::error::{SocialError, SocialResult};

/// Input DTO for create post
#[derive(Debug, Clone)]
pub struct CreatePostInput {
    pub user_id: UserId,
    pub title: String,
    pub content: String,
}

/// Create Post Use Case
pub struct CreatePostUseCase<P, U>
where
    P: PostRepository,
    U: UserDirectory,
{
    post_repo: Arc<P>,
    user_directory: Arc<U>,
    config: Arc<SocialConfig>,
}

impl<P, U> CreatePostUseCase<P, U>
where
    P: PostRepository,
    U: UserDirectory,
{
    pub fn new(post_repo: Arc<P>, user_directory: Arc<U>, config: Arc<SocialConfig>) -> Self {
        Self {
            post_repo,
            user_directory,
            config,
        }
    }

    pub async fn execute(&self, input: CreatePostInput) -> SocialResult<Post> {
        let new_post = validate_post(
            input.user_id,
            &input.title,
            &input.content,
            self.config.max_title_length,
            self.config.max_content_length,
        )?;

        if !self.user_directory.user_exists(input.user_id).await? {
            return Err(SocialError::UserNotFound);
        }

        let post = self.post_repo.create(&new_post).await?;

        tracing::info!(post_id = %post.post_id, user_id = %post.user_id, "Post created");

        Ok(post)
    }
}

/// Post Query Use Case
pub struct PostQueryUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> PostQueryUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    pub async fn get(&self, post_id: PostId) -> SocialResult<Post> {
        self.post_repo
            .find_by_id(post_id)
            .await?
            .ok_or(SocialError::PostNotFound)
    }

    /// Empty when there are no posts
    pub async fn list(&self) -> SocialResult<Vec<Post>> {
        self.post_repo.list_all().await
    }

    pub async fn list_by_author(&self, user_id: UserId) -> SocialResult<Vec<Post>> {
        self.post_repo.list_by_author(user_id).await
    }

    /// Owner of a post, `None` when the post does not exist
    pub async fn owner_of(&self, post_id: PostId) -> SocialResult<Option<UserId>> {
        Ok(self.post_repo.find_by_id(post_id).await?.map(|p| p.user_id))
    }
}
