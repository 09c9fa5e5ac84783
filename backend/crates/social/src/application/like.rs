//! Like / Unlike Use Cases

use std::sync::Arc;

use kernel::id::{PostId, UserId};

use crate::application::block_exists_between;
use crate::domain::edge::Edge;
use crate::domain::outcome::{LikeOutcome, UnlikeOutcome};
use crate::domain::repository::{EdgeStore, EdgeTransaction};
use crate::error::SocialResult;

/// Like Use Case
///
/// The caller resolves the post's owner; `None` means the post does not
/// exist. Liking one's own post is allowed.
pub struct LikeUseCase<S>
where
    S: EdgeStore,
{
    store: Arc<S>,
}

impl<S> LikeUseCase<S>
where
    S: EdgeStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        actor: UserId,
        post: PostId,
        owner: Option<UserId>,
    ) -> SocialResult<LikeOutcome> {
        let Some(owner) = owner else {
            return Ok(LikeOutcome::TargetMissing);
        };

        let edge = Edge::like(actor, post);
        let mut tx = self.store.begin().await?;
        tx.lock_pair(actor.get(), owner.get()).await?;

        if tx.exists_edge(&edge).await? {
            return Ok(LikeOutcome::AlreadyLiked);
        }

        if actor != owner && block_exists_between(&mut tx, actor, owner).await? {
            tracing::debug!(actor = %actor, owner = %owner, post = %post, "Like refused by block");
            return Ok(LikeOutcome::Blocked);
        }

        if !tx.insert_edge(&edge).await? {
            return Ok(LikeOutcome::AlreadyLiked);
        }

        tx.commit().await?;

        tracing::info!(actor = %actor, post = %post, "Like created");

        Ok(LikeOutcome::Created)
    }
}

/// Unlike Use Case
pub struct UnlikeUseCase<S>
where
    S: EdgeStore,
{
    store: Arc<S>,
}

impl<S> UnlikeUseCase<S>
where
    S: EdgeStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, actor: UserId, post: PostId) -> SocialResult<UnlikeOutcome> {
        let mut tx = self.store.begin().await?;

        if !tx.delete_edge(&Edge::like(actor, post)).await? {
            return Ok(UnlikeOutcome::NotLiked);
        }

        tx.commit().await?;

        tracing::info!(actor = %actor, post = %post, "Like removed");

        Ok(UnlikeOutcome::Removed)
    }
}
