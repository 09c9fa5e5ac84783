//! In-memory Repository Implementations
//!
//! Backs tests and local experiments. A transaction holds the store lock for
//! its whole lifetime and works on a staged copy, so transactions are fully
//! serialised and a dropped transaction leaves no trace.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use chrono::Utc;
use kernel::id::{PostId, UserId};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::edge::{Edge, EdgeFilter, EdgeKind};
use crate::domain::post::{NewPost, Post};
use crate::domain::repository::{EdgeStore, EdgeTransaction, PostRepository, UserDirectory};
use crate::error::{SocialError, SocialResult};

#[derive(Clone, Default)]
pub struct InMemorySocialRepository {
    edges: Arc<Mutex<HashSet<Edge>>>,
    posts: Arc<Mutex<Vec<Post>>>,
    users: Arc<Mutex<HashSet<UserId>>>,
    next_post_id: Arc<AtomicI64>,
    fail_inserts: Arc<AtomicBool>,
}

impl InMemorySocialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register users known to the directory
    pub async fn with_users(self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.users
            .lock()
            .await
            .extend(ids.into_iter().map(UserId::new));
        self
    }

    /// Make every subsequent edge insert fail with a storage error
    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Committed edges
    pub async fn snapshot(&self) -> HashSet<Edge> {
        self.edges.lock().await.clone()
    }

    /// Write an edge directly, bypassing every use-case check
    pub async fn seed_edge(&self, edge: Edge) {
        self.edges.lock().await.insert(edge);
    }
}

pub struct InMemoryEdgeTransaction {
    committed: OwnedMutexGuard<HashSet<Edge>>,
    staged: HashSet<Edge>,
    fail_inserts: Arc<AtomicBool>,
}

impl EdgeStore for InMemorySocialRepository {
    type Tx = InMemoryEdgeTransaction;

    async fn begin(&self) -> SocialResult<InMemoryEdgeTransaction> {
        let committed = self.edges.clone().lock_owned().await;
        let staged = committed.clone();
        Ok(InMemoryEdgeTransaction {
            committed,
            staged,
            fail_inserts: self.fail_inserts.clone(),
        })
    }
}

impl EdgeTransaction for InMemoryEdgeTransaction {
    async fn lock_pair(&mut self, _a: i64, _b: i64) -> SocialResult<()> {
        // The whole store is already locked
        Ok(())
    }

    async fn insert_edge(&mut self, edge: &Edge) -> SocialResult<bool> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(SocialError::storage(std::io::Error::other(
                "injected edge insert failure",
            )));
        }
        Ok(self.staged.insert(*edge))
    }

    async fn delete_edge(&mut self, edge: &Edge) -> SocialResult<bool> {
        Ok(self.staged.remove(edge))
    }

    async fn exists_edge(&mut self, edge: &Edge) -> SocialResult<bool> {
        Ok(self.staged.contains(edge))
    }

    async fn edges_where(&mut self, kind: EdgeKind, filter: EdgeFilter) -> SocialResult<Vec<Edge>> {
        let mut edges: Vec<Edge> = self
            .staged
            .iter()
            .filter(|e| e.kind == kind && filter.matches(e))
            .copied()
            .collect();
        edges.sort();
        Ok(edges)
    }

    async fn commit(mut self) -> SocialResult<()> {
        *self.committed = std::mem::take(&mut self.staged);
        Ok(())
    }
}

impl PostRepository for InMemorySocialRepository {
    async fn create(&self, post: &NewPost) -> SocialResult<Post> {
        let id = self.next_post_id.fetch_add(1, Ordering::SeqCst) + 1;
        let post = Post {
            post_id: PostId::new(id),
            user_id: post.user_id,
            title: post.title.clone(),
            content: post.content.clone(),
            created_at: Utc::now(),
        };
        self.posts.lock().await.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, post_id: PostId) -> SocialResult<Option<Post>> {
        let posts = self.posts.lock().await;
        Ok(posts.iter().find(|p| p.post_id == post_id).cloned())
    }

    async fn list_all(&self) -> SocialResult<Vec<Post>> {
        let posts = self.posts.lock().await;
        Ok(posts.iter().rev().cloned().collect())
    }

    async fn list_by_author(&self, user_id: UserId) -> SocialResult<Vec<Post>> {
        let posts = self.posts.lock().await;
        Ok(posts
            .iter()
            .rev()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }
}

impl UserDirectory for InMemorySocialRepository {
    async fn user_exists(&self, user_id: UserId) -> SocialResult<bool> {
        Ok(self.users.lock().await.contains(&user_id))
    }
}
