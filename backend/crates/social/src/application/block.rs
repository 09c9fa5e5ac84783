//! Block / Unblock Use Cases

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::edge::Edge;
use crate::domain::outcome::{BlockOutcome, UnblockOutcome};
use crate::domain::repository::{EdgeStore, EdgeTransaction};
use crate::error::SocialResult;

/// Block Use Case
///
/// Severs follows in both directions and records the block in one
/// transaction. Likes are left untouched.
pub struct BlockUseCase<S>
where
    S: EdgeStore,
{
    store: Arc<S>,
}

impl<S> BlockUseCase<S>
where
    S: EdgeStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, blocker: UserId, blocked: UserId) -> SocialResult<BlockOutcome> {
        if blocker == blocked {
            return Ok(BlockOutcome::SelfBlock);
        }

        let edge = Edge::block(blocker, blocked);
        let mut tx = self.store.begin().await?;
        tx.lock_pair(blocker.get(), blocked.get()).await?;

        if tx.exists_edge(&edge).await? {
            return Ok(BlockOutcome::AlreadyBlocked);
        }

        let follow = Edge::follow(blocker, blocked);
        let mut severed = 0u8;
        for f in [follow, follow.reversed()] {
            if tx.delete_edge(&f).await? {
                severed += 1;
            }
        }

        if !tx.insert_edge(&edge).await? {
            return Ok(BlockOutcome::AlreadyBlocked);
        }

        tx.commit().await?;

        tracing::info!(
            blocker = %blocker,
            blocked = %blocked,
            severed_follows = severed,
            "Block created"
        );

        Ok(BlockOutcome::Created)
    }
}

/// Unblock Use Case
///
/// Follows severed by the block are not restored.
pub struct UnblockUseCase<S>
where
    S: EdgeStore,
{
    store: Arc<S>,
}

impl<S> UnblockUseCase<S>
where
    S: EdgeStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, blocker: UserId, blocked: UserId) -> SocialResult<UnblockOutcome> {
        let mut tx = self.store.begin().await?;

        if !tx.delete_edge(&Edge::block(blocker, blocked)).await? {
            return Ok(UnblockOutcome::NotBlocked);
        }

        tx.commit().await?;

        tracing::info!(blocker = %blocker, blocked = %blocked, "Block removed");

        Ok(UnblockOutcome::Removed)
    }
}
