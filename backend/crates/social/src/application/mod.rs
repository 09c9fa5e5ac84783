//! Application Layer - Use Cases
//!
//! Every relationship use case opens exactly one edge-store transaction,
//! performs its checks and writes inside it, and commits at the end. An
//! early return drops the transaction, which discards it.

pub mod block;
pub mod config;
pub mod follow;
pub mod like;
pub mod listing;
pub mod post;

use kernel::id::UserId;

use crate::domain::edge::Edge;
use crate::domain::repository::EdgeTransaction;
use crate::error::SocialResult;

/// A block edge exists between `a` and `b` in either direction
pub(crate) async fn block_exists_between<T>(tx: &mut T, a: UserId, b: UserId) -> SocialResult<bool>
where
    T: EdgeTransaction,
{
    let forward = Edge::block(a, b);
    Ok(tx.exists_edge(&forward).await? || tx.exists_edge(&forward.reversed()).await?)
}
