//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use std::future::Future;

use kernel::id::{PostId, UserId};

use crate::domain::edge::{Edge, EdgeFilter, EdgeKind};
use crate::domain::post::{NewPost, Post};
use crate::error::SocialResult;

/// One atomic unit of work on the edge store
///
/// Every read made through the transaction sees its own writes. Nothing is
/// visible to other transactions until [`commit`](LocalEdgeTransaction::commit);
/// dropping the transaction discards all of its writes.
#[trait_variant::make(EdgeTransaction: Send)]
pub trait LocalEdgeTransaction {
    /// Serialise with other transactions touching the same unordered pair
    async fn lock_pair(&mut self, a: i64, b: i64) -> SocialResult<()>;

    /// Returns false when the edge already existed
    async fn insert_edge(&mut self, edge: &Edge) -> SocialResult<bool>;

    /// Returns false when there was nothing to delete
    async fn delete_edge(&mut self, edge: &Edge) -> SocialResult<bool>;

    async fn exists_edge(&mut self, edge: &Edge) -> SocialResult<bool>;

    async fn edges_where(&mut self, kind: EdgeKind, filter: EdgeFilter) -> SocialResult<Vec<Edge>>;

    async fn commit(self) -> SocialResult<()>;
}

/// Source of edge transactions
pub trait EdgeStore: Send + Sync {
    type Tx: EdgeTransaction + Send;

    fn begin(&self) -> impl Future<Output = SocialResult<Self::Tx>> + Send;
}

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    async fn create(&self, post: &NewPost) -> SocialResult<Post>;

    async fn find_by_id(&self, post_id: PostId) -> SocialResult<Option<Post>>;

    /// Newest first
    async fn list_all(&self) -> SocialResult<Vec<Post>>;

    /// Newest first
    async fn list_by_author(&self, user_id: UserId) -> SocialResult<Vec<Post>>;
}

/// Read-only view of the user registry
#[trait_variant::make(UserDirectory: Send)]
pub trait LocalUserDirectory {
    async fn user_exists(&self, user_id: UserId) -> SocialResult<bool>;
}

/// Everything the HTTP surface needs from one backing store
pub trait SocialRepository:
    EdgeStore + PostRepository + UserDirectory + Clone + Send + Sync + 'static
{
}

impl<T> SocialRepository for T where
    T: EdgeStore + PostRepository + UserDirectory + Clone + Send + Sync + 'static
{
}
