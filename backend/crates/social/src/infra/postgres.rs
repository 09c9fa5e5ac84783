//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::edge::{Edge, EdgeFilter, EdgeKind};
use crate::domain::post::{NewPost, Post};
use crate::domain::repository::{EdgeStore, EdgeTransaction, PostRepository, UserDirectory};
use crate::domain::services::pair_lock_key;
use crate::error::{SocialError, SocialResult};

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgSocialRepository {
    pool: PgPool,
}

impl PgSocialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Edge transaction over a pooled connection; rolls back on drop
pub struct PgEdgeTransaction {
    tx: Transaction<'static, Postgres>,
}

impl EdgeStore for PgSocialRepository {
    type Tx = PgEdgeTransaction;

    async fn begin(&self) -> SocialResult<PgEdgeTransaction> {
        let tx = self.pool.begin().await?;
        Ok(PgEdgeTransaction { tx })
    }
}

impl EdgeTransaction for PgEdgeTransaction {
    async fn lock_pair(&mut self, a: i64, b: i64) -> SocialResult<()> {
        // Released automatically at commit or rollback
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(pair_lock_key(a, b))
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn insert_edge(&mut self, edge: &Edge) -> SocialResult<bool> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO social_edges (edge_kind, source_id, target_id)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(edge.kind.as_i16())
        .bind(edge.source)
        .bind(edge.target)
        .execute(&mut *self.tx)
        .await?
        .rows_affected();

        Ok(inserted == 1)
    }

    async fn delete_edge(&mut self, edge: &Edge) -> SocialResult<bool> {
        let deleted = sqlx::query(
            r#"
            DELETE FROM social_edges
            WHERE edge_kind = $1 AND source_id = $2 AND target_id = $3
            "#,
        )
        .bind(edge.kind.as_i16())
        .bind(edge.source)
        .bind(edge.target)
        .execute(&mut *self.tx)
        .await?
        .rows_affected();

        Ok(deleted == 1)
    }

    async fn exists_edge(&mut self, edge: &Edge) -> SocialResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM social_edges
                WHERE edge_kind = $1 AND source_id = $2 AND target_id = $3
            )
            "#,
        )
        .bind(edge.kind.as_i16())
        .bind(edge.source)
        .bind(edge.target)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(exists)
    }

    async fn edges_where(&mut self, kind: EdgeKind, filter: EdgeFilter) -> SocialResult<Vec<Edge>> {
        let (sql, id) = match filter {
            EdgeFilter::Source(id) => (
                "SELECT edge_kind, source_id, target_id FROM social_edges \
                 WHERE edge_kind = $1 AND source_id = $2",
                id,
            ),
            EdgeFilter::Target(id) => (
                "SELECT edge_kind, source_id, target_id FROM social_edges \
                 WHERE edge_kind = $1 AND target_id = $2",
                id,
            ),
            EdgeFilter::Touching(id) => (
                "SELECT edge_kind, source_id, target_id FROM social_edges \
                 WHERE edge_kind = $1 AND (source_id = $2 OR target_id = $2)",
                id,
            ),
        };

        let rows = sqlx::query_as::<_, EdgeRow>(sql)
            .bind(kind.as_i16())
            .bind(id)
            .fetch_all(&mut *self.tx)
            .await?;

        rows.into_iter().map(EdgeRow::into_edge).collect()
    }

    async fn commit(self) -> SocialResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

impl PostRepository for PgSocialRepository {
    async fn create(&self, post: &NewPost) -> SocialResult<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (user_id, title, content)
            VALUES ($1, $2, $3)
            RETURNING post_id, user_id, title, content, created_at
            "#,
        )
        .bind(post.user_id.get())
        .bind(&post.title)
        .bind(&post.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Author deleted between the existence check and the insert
            let missing_author =
                matches!(&e, sqlx::Error::Database(db) if db.is_foreign_key_violation());
            if missing_author {
                SocialError::UserNotFound
            } else {
                SocialError::from(e)
            }
        })?;

        Ok(row.into_post())
    }

    async fn find_by_id(&self, post_id: PostId) -> SocialResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT post_id, user_id, title, content, created_at
            FROM posts
            WHERE post_id = $1
            "#,
        )
        .bind(post_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn list_all(&self) -> SocialResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT post_id, user_id, title, content, created_at
            FROM posts
            ORDER BY created_at DESC, post_id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn list_by_author(&self, user_id: UserId) -> SocialResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT post_id, user_id, title, content, created_at
            FROM posts
            WHERE user_id = $1
            ORDER BY created_at DESC, post_id DESC
            "#,
        )
        .bind(user_id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }
}

impl UserDirectory for PgSocialRepository {
    async fn user_exists(&self, user_id: UserId) -> SocialResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)")
                .bind(user_id.get())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

#[derive(sqlx::FromRow)]
struct EdgeRow {
    edge_kind: i16,
    source_id: i64,
    target_id: i64,
}

impl EdgeRow {
    fn into_edge(self) -> SocialResult<Edge> {
        let kind = EdgeKind::from_i16(self.edge_kind).ok_or_else(|| {
            SocialError::Internal(format!("unknown edge kind {}", self.edge_kind))
        })?;
        Ok(Edge::new(kind, self.source_id, self.target_id))
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: i64,
    user_id: i64,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            post_id: PostId::new(self.post_id),
            user_id: UserId::new(self.user_id),
            title: self.title,
            content: self.content,
            created_at: self.created_at,
        }
    }
}
