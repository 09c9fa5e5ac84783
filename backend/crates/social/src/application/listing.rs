//! Follower / Following Listings

use std::collections::BTreeSet;
use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::edge::{Edge, EdgeFilter, EdgeKind};
use crate::domain::repository::{EdgeStore, EdgeTransaction};
use crate::domain::services::without_blocked;
use crate::error::SocialResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Followers,
    Following,
}

/// List Relations Use Case
///
/// Listings never expose a user that shares a block with the subject, even
/// if a follow edge between them survived somehow.
pub struct ListRelationsUseCase<S>
where
    S: EdgeStore,
{
    store: Arc<S>,
}

impl<S> ListRelationsUseCase<S>
where
    S: EdgeStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Users following `user`
    pub async fn followers(&self, user: UserId) -> SocialResult<BTreeSet<UserId>> {
        self.list(user, Direction::Followers).await
    }

    /// Users `user` follows
    pub async fn following(&self, user: UserId) -> SocialResult<BTreeSet<UserId>> {
        self.list(user, Direction::Following).await
    }

    async fn list(&self, user: UserId, direction: Direction) -> SocialResult<BTreeSet<UserId>> {
        let mut tx = self.store.begin().await?;

        let (filter, pick): (EdgeFilter, fn(&Edge) -> i64) = match direction {
            Direction::Followers => (EdgeFilter::Target(user.get()), |e: &Edge| e.source),
            Direction::Following => (EdgeFilter::Source(user.get()), |e: &Edge| e.target),
        };

        let follows = tx.edges_where(EdgeKind::Follow, filter).await?;
        let blocks = tx
            .edges_where(EdgeKind::Block, EdgeFilter::Touching(user.get()))
            .await?;
        tx.commit().await?;

        let (visible, hidden) = without_blocked(user, follows.iter().map(pick), &blocks);

        if !hidden.is_empty() {
            tracing::warn!(
                user = %user,
                ?direction,
                hidden = ?hidden,
                "Follow edges coexist with a block; hiding them from the listing"
            );
        }

        Ok(visible)
    }
}
