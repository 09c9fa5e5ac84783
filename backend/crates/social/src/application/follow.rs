//! Follow / Unfollow Use Cases

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::block_exists_between;
use crate::domain::edge::Edge;
use crate::domain::outcome::{FollowOutcome, UnfollowOutcome};
use crate::domain::repository::{EdgeStore, EdgeTransaction};
use crate::error::SocialResult;

/// Follow Use Case
pub struct FollowUseCase<S>
where
    S: EdgeStore,
{
    store: Arc<S>,
}

impl<S> FollowUseCase<S>
where
    S: EdgeStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, actor: UserId, target: UserId) -> SocialResult<FollowOutcome> {
        if actor == target {
            return Ok(FollowOutcome::SelfFollow);
        }

        let edge = Edge::follow(actor, target);
        let mut tx = self.store.begin().await?;
        tx.lock_pair(actor.get(), target.get()).await?;

        if tx.exists_edge(&edge).await? {
            return Ok(FollowOutcome::AlreadyExists);
        }

        if block_exists_between(&mut tx, actor, target).await? {
            tracing::debug!(actor = %actor, target = %target, "Follow refused by block");
            return Ok(FollowOutcome::Blocked);
        }

        if !tx.insert_edge(&edge).await? {
            return Ok(FollowOutcome::AlreadyExists);
        }

        tx.commit().await?;

        tracing::info!(actor = %actor, target = %target, "Follow created");

        Ok(FollowOutcome::Created)
    }
}

/// Unfollow Use Case
pub struct UnfollowUseCase<S>
where
    S: EdgeStore,
{
    store: Arc<S>,
}

impl<S> UnfollowUseCase<S>
where
    S: EdgeStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, actor: UserId, target: UserId) -> SocialResult<UnfollowOutcome> {
        let mut tx = self.store.begin().await?;

        if !tx.delete_edge(&Edge::follow(actor, target)).await? {
            return Ok(UnfollowOutcome::NotFollowing);
        }

        tx.commit().await?;

        tracing::info!(actor = %actor, target = %target, "Follow removed");

        Ok(UnfollowOutcome::Removed)
    }
}
