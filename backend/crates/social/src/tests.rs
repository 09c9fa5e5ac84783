//! Unit tests for social crate

#[cfg(test)]
mod relationship_tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use kernel::id::{PostId, UserId};

    use crate::application::block::{BlockUseCase, UnblockUseCase};
    use crate::application::follow::{FollowUseCase, UnfollowUseCase};
    use crate::application::like::{LikeUseCase, UnlikeUseCase};
    use crate::application::listing::ListRelationsUseCase;
    use crate::domain::edge::{Edge, EdgeKind};
    use crate::domain::outcome::*;
    use crate::error::SocialError;
    use crate::infra::memory::InMemorySocialRepository;

    fn uid(n: i64) -> UserId {
        UserId::new(n)
    }

    struct Social {
        repo: Arc<InMemorySocialRepository>,
    }

    impl Social {
        fn new() -> Self {
            Self {
                repo: Arc::new(InMemorySocialRepository::new()),
            }
        }

        async fn follow(&self, a: i64, b: i64) -> FollowOutcome {
            FollowUseCase::new(self.repo.clone())
                .execute(uid(a), uid(b))
                .await
                .unwrap()
        }

        async fn unfollow(&self, a: i64, b: i64) -> UnfollowOutcome {
            UnfollowUseCase::new(self.repo.clone())
                .execute(uid(a), uid(b))
                .await
                .unwrap()
        }

        async fn block(&self, a: i64, b: i64) -> BlockOutcome {
            BlockUseCase::new(self.repo.clone())
                .execute(uid(a), uid(b))
                .await
                .unwrap()
        }

        async fn unblock(&self, a: i64, b: i64) -> UnblockOutcome {
            UnblockUseCase::new(self.repo.clone())
                .execute(uid(a), uid(b))
                .await
                .unwrap()
        }

        async fn like(&self, a: i64, post: i64, owner: Option<i64>) -> LikeOutcome {
            LikeUseCase::new(self.repo.clone())
                .execute(uid(a), PostId::new(post), owner.map(uid))
                .await
                .unwrap()
        }

        async fn unlike(&self, a: i64, post: i64) -> UnlikeOutcome {
            UnlikeUseCase::new(self.repo.clone())
                .execute(uid(a), PostId::new(post))
                .await
                .unwrap()
        }

        async fn followers(&self, a: i64) -> BTreeSet<UserId> {
            ListRelationsUseCase::new(self.repo.clone())
                .followers(uid(a))
                .await
                .unwrap()
        }

        async fn following(&self, a: i64) -> BTreeSet<UserId> {
            ListRelationsUseCase::new(self.repo.clone())
                .following(uid(a))
                .await
                .unwrap()
        }

        /// No follow edge shares a pair with a block edge
        async fn assert_no_coexistence(&self) {
            let edges = self.repo.snapshot().await;
            for edge in edges.iter().filter(|e| e.kind == EdgeKind::Follow) {
                let block = Edge::new(EdgeKind::Block, edge.source, edge.target);
                assert!(
                    !edges.contains(&block) && !edges.contains(&block.reversed()),
                    "follow {edge:?} coexists with a block"
                );
            }
        }
    }

    fn ids(values: &[i64]) -> BTreeSet<UserId> {
        values.iter().copied().map(uid).collect()
    }

    #[tokio::test]
    async fn test_follow_twice_reports_already_exists() {
        let social = Social::new();

        assert_eq!(social.follow(1, 2).await, FollowOutcome::Created);
        let after_first = social.repo.snapshot().await;

        assert_eq!(social.follow(1, 2).await, FollowOutcome::AlreadyExists);
        assert_eq!(social.repo.snapshot().await, after_first);
    }

    #[tokio::test]
    async fn test_block_severs_existing_follow() {
        let social = Social::new();

        assert_eq!(social.follow(1, 2).await, FollowOutcome::Created);
        assert_eq!(social.block(1, 2).await, BlockOutcome::Created);

        assert!(!social.following(1).await.contains(&uid(2)));
        let edges = social.repo.snapshot().await;
        assert!(!edges.contains(&Edge::follow(uid(1), uid(2))));
        assert!(edges.contains(&Edge::block(uid(1), uid(2))));
    }

    #[tokio::test]
    async fn test_block_severs_follows_in_both_directions() {
        let social = Social::new();
        social.follow(1, 2).await;
        social.follow(2, 1).await;
        social.follow(3, 1).await;

        assert_eq!(social.block(1, 2).await, BlockOutcome::Created);

        let edges = social.repo.snapshot().await;
        assert!(!edges.contains(&Edge::follow(uid(1), uid(2))));
        assert!(!edges.contains(&Edge::follow(uid(2), uid(1))));
        assert!(edges.contains(&Edge::follow(uid(3), uid(1))));
        assert_eq!(social.followers(1).await, ids(&[3]));
    }

    #[tokio::test]
    async fn test_failed_block_leaves_follow_intact() {
        let social = Social::new();
        social.follow(1, 2).await;
        let before = social.repo.snapshot().await;

        social.repo.set_fail_inserts(true);
        let result = BlockUseCase::new(social.repo.clone())
            .execute(uid(1), uid(2))
            .await;
        assert!(matches!(result, Err(SocialError::Storage(_))));

        social.repo.set_fail_inserts(false);
        assert_eq!(social.repo.snapshot().await, before);
        assert_eq!(social.following(1).await, ids(&[2]));
    }

    #[tokio::test]
    async fn test_follow_self() {
        let social = Social::new();
        assert_eq!(social.follow(1, 1).await, FollowOutcome::SelfFollow);
        assert!(social.repo.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_block_self() {
        let social = Social::new();
        assert_eq!(social.block(4, 4).await, BlockOutcome::SelfBlock);
        assert!(social.repo.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_follow_blocked_in_either_direction() {
        let social = Social::new();
        social.block(1, 2).await;
        assert_eq!(social.follow(1, 2).await, FollowOutcome::Blocked);
        assert_eq!(social.follow(2, 1).await, FollowOutcome::Blocked);

        let social = Social::new();
        social.block(2, 1).await;
        assert_eq!(social.follow(1, 2).await, FollowOutcome::Blocked);
        assert_eq!(social.follow(2, 1).await, FollowOutcome::Blocked);
    }

    #[tokio::test]
    async fn test_block_unblock_then_follow_again() {
        let social = Social::new();

        assert_eq!(social.block(3, 4).await, BlockOutcome::Created);
        assert_eq!(social.follow(3, 4).await, FollowOutcome::Blocked);
        assert_eq!(social.unblock(3, 4).await, UnblockOutcome::Removed);
        assert_eq!(social.follow(3, 4).await, FollowOutcome::Created);
    }

    #[tokio::test]
    async fn test_block_twice_and_unblock_missing() {
        let social = Social::new();
        assert_eq!(social.block(1, 2).await, BlockOutcome::Created);
        assert_eq!(social.block(1, 2).await, BlockOutcome::AlreadyBlocked);
        assert_eq!(social.unblock(2, 1).await, UnblockOutcome::NotBlocked);
    }

    #[tokio::test]
    async fn test_unblock_does_not_restore_follows() {
        let social = Social::new();
        social.follow(1, 2).await;
        social.block(1, 2).await;
        social.unblock(1, 2).await;

        assert!(social.following(1).await.is_empty());
    }

    #[tokio::test]
    async fn test_unfollow() {
        let social = Social::new();
        assert_eq!(social.unfollow(1, 2).await, UnfollowOutcome::NotFollowing);

        social.follow(1, 2).await;
        assert_eq!(social.unfollow(1, 2).await, UnfollowOutcome::Removed);
        assert_eq!(social.unfollow(1, 2).await, UnfollowOutcome::NotFollowing);
        assert!(social.repo.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_likes_survive_block() {
        let social = Social::new();

        assert_eq!(social.like(5, 10, Some(6)).await, LikeOutcome::Created);
        assert_eq!(social.block(5, 6).await, BlockOutcome::Created);
        assert_eq!(social.unlike(5, 10).await, UnlikeOutcome::Removed);
    }

    #[tokio::test]
    async fn test_like_outcomes() {
        let social = Social::new();

        assert_eq!(social.like(1, 10, None).await, LikeOutcome::TargetMissing);
        assert_eq!(social.like(1, 10, Some(2)).await, LikeOutcome::Created);
        assert_eq!(social.like(1, 10, Some(2)).await, LikeOutcome::AlreadyLiked);
        assert_eq!(social.unlike(1, 11).await, UnlikeOutcome::NotLiked);
    }

    #[tokio::test]
    async fn test_like_blocked_by_post_owner_either_direction() {
        let social = Social::new();
        social.block(2, 1).await;
        assert_eq!(social.like(1, 10, Some(2)).await, LikeOutcome::Blocked);

        let social = Social::new();
        social.block(1, 2).await;
        assert_eq!(social.like(1, 10, Some(2)).await, LikeOutcome::Blocked);
        // Unrelated owner is unaffected
        assert_eq!(social.like(1, 11, Some(3)).await, LikeOutcome::Created);
    }

    #[tokio::test]
    async fn test_like_own_post() {
        let social = Social::new();
        assert_eq!(social.like(7, 70, Some(7)).await, LikeOutcome::Created);
    }

    #[tokio::test]
    async fn test_listing_hides_stale_follow_next_to_block() {
        let social = Social::new();
        social.block(1, 2).await;
        social.follow(3, 1).await;
        // Only reachable by writing around the use cases
        social.repo.seed_edge(Edge::follow(uid(2), uid(1))).await;

        assert_eq!(social.followers(1).await, ids(&[3]));
        assert!(!social.following(2).await.contains(&uid(1)));
    }

    #[tokio::test]
    async fn test_listings_are_symmetric() {
        let social = Social::new();
        social.follow(1, 2).await;
        social.follow(1, 3).await;
        social.follow(4, 1).await;

        assert_eq!(social.following(1).await, ids(&[2, 3]));
        assert_eq!(social.followers(1).await, ids(&[4]));
        assert_eq!(social.followers(2).await, ids(&[1]));
        assert!(social.followers(9).await.is_empty());
    }

    #[tokio::test]
    async fn test_no_coexistence_after_mixed_sequence() {
        let social = Social::new();
        let steps: [(u8, i64, i64); 14] = [
            (0, 1, 2),
            (0, 2, 1),
            (1, 1, 2),
            (0, 1, 2),
            (0, 2, 3),
            (2, 1, 2),
            (0, 1, 2),
            (1, 3, 2),
            (0, 2, 3),
            (3, 2, 3),
            (0, 3, 2),
            (1, 2, 3),
            (2, 3, 2),
            (0, 3, 1),
        ];

        for (op, a, b) in steps {
            match op {
                0 => {
                    social.follow(a, b).await;
                }
                1 => {
                    social.block(a, b).await;
                }
                2 => {
                    social.unblock(a, b).await;
                }
                _ => {
                    social.unfollow(a, b).await;
                }
            }
            social.assert_no_coexistence().await;
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_follow_and_block_never_coexist() {
        for _ in 0..25 {
            let social = Arc::new(Social::new());

            let mut handles = Vec::new();
            for i in 0..8 {
                let social = social.clone();
                handles.push(tokio::spawn(async move {
                    if i % 2 == 0 {
                        social.follow(1, 2).await;
                        social.follow(2, 1).await;
                    } else {
                        social.block(2, 1).await;
                    }
                }));
            }
            for handle in handles {
                handle.await.unwrap();
            }

            social.assert_no_coexistence().await;
            assert!(social.following(1).await.is_empty());
            assert!(social.following(2).await.is_empty());
        }
    }
}

#[cfg(test)]
mod post_tests {
    use std::sync::Arc;

    use kernel::id::{PostId, UserId};

    use crate::application::config::SocialConfig;
    use crate::application::post::{CreatePostInput, CreatePostUseCase, PostQueryUseCase};
    use crate::error::SocialError;
    use crate::infra::memory::InMemorySocialRepository;

    async fn repo() -> Arc<InMemorySocialRepository> {
        Arc::new(InMemorySocialRepository::new().with_users([1, 2]).await)
    }

    fn input(user: i64, title: &str, content: &str) -> CreatePostInput {
        CreatePostInput {
            user_id: UserId::new(user),
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_default_config() {
        let config = SocialConfig::default();
        assert_eq!(config.max_title_length, 1000);
        assert_eq!(config.max_content_length, 500);
    }

    #[tokio::test]
    async fn test_create_and_get_post() {
        let repo = repo().await;
        let use_case =
            CreatePostUseCase::new(repo.clone(), repo.clone(), Arc::new(SocialConfig::default()));

        let post = use_case.execute(input(1, "Hello", "World")).await.unwrap();
        assert_eq!(post.user_id, UserId::new(1));

        let query = PostQueryUseCase::new(repo.clone());
        assert_eq!(query.get(post.post_id).await.unwrap(), post);
        assert_eq!(query.owner_of(post.post_id).await.unwrap(), Some(UserId::new(1)));
        assert_eq!(query.owner_of(PostId::new(999)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_post_unknown_author() {
        let repo = repo().await;
        let use_case =
            CreatePostUseCase::new(repo.clone(), repo.clone(), Arc::new(SocialConfig::default()));

        let err = use_case.execute(input(42, "Hello", "World")).await.unwrap_err();
        assert!(matches!(err, SocialError::UserNotFound));
    }

    #[tokio::test]
    async fn test_create_post_rejects_invalid_fields() {
        let repo = repo().await;
        let config = SocialConfig {
            max_title_length: 5,
            max_content_length: 5,
        };
        let use_case = CreatePostUseCase::new(repo.clone(), repo.clone(), Arc::new(config));

        for (title, content) in [(" ", "body"), ("title", ""), ("too long", "body")] {
            let err = use_case.execute(input(1, title, content)).await.unwrap_err();
            assert!(matches!(err, SocialError::InvalidPost(_)), "{title:?}/{content:?}");
        }
    }

    #[tokio::test]
    async fn test_get_missing_post_and_empty_list() {
        let repo = repo().await;
        let query = PostQueryUseCase::new(repo);

        assert!(matches!(
            query.get(PostId::new(1)).await,
            Err(SocialError::PostNotFound)
        ));
        assert!(query.list().await.unwrap().is_empty());
    }
}

#[cfg(test)]
mod router_tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::config::SocialConfig;
    use crate::infra::memory::InMemorySocialRepository;
    use crate::presentation::router::social_router_generic;

    async fn app() -> Router {
        let repo = InMemorySocialRepository::new()
            .with_users([1, 2, 3, 4, 5, 6])
            .await;
        social_router_generic(repo, SocialConfig::default())
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_follow_endpoint_outcomes() {
        let app = app().await;
        let body = json!({"followerId": 1, "followeeId": 2});

        let (status, value) = send(&app, Method::POST, "/follows", Some(body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(value["outcome"], "created");

        let (status, value) = send(&app, Method::POST, "/follows", Some(body.clone())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(value["outcome"], "alreadyExists");
        assert_eq!(value["message"], "Already following");

        let (status, value) = send(&app, Method::DELETE, "/follows", Some(body.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["outcome"], "removed");

        let (status, value) = send(&app, Method::DELETE, "/follows", Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(value["outcome"], "notFollowing");
    }

    #[tokio::test]
    async fn test_self_follow_is_unprocessable() {
        let app = app().await;
        let (status, value) = send(
            &app,
            Method::POST,
            "/follows",
            Some(json!({"followerId": 3, "followeeId": 3})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(value["outcome"], "selfFollow");
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let app = app().await;
        let (status, value) = send(
            &app,
            Method::POST,
            "/follows",
            Some(json!({"followerId": 1, "followeeId": 99})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(value["detail"], "User not found");

        let (status, _) = send(&app, Method::GET, "/users/99/followers", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_block_then_follow_is_forbidden() {
        let app = app().await;
        send(
            &app,
            Method::POST,
            "/follows",
            Some(json!({"followerId": 1, "followeeId": 2})),
        )
        .await;

        let (status, value) = send(
            &app,
            Method::POST,
            "/blocks",
            Some(json!({"blockerId": 2, "blockedId": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(value["outcome"], "created");

        let (status, value) = send(
            &app,
            Method::POST,
            "/follows",
            Some(json!({"followerId": 1, "followeeId": 2})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(value["outcome"], "blocked");

        let (status, value) = send(&app, Method::GET, "/users/2/followers", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, json!({"userId": 2, "followers": []}));

        let (status, value) = send(
            &app,
            Method::DELETE,
            "/blocks",
            Some(json!({"blockerId": 2, "blockedId": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["outcome"], "removed");
    }

    #[tokio::test]
    async fn test_post_and_like_flow() {
        let app = app().await;

        let (status, post) = send(
            &app,
            Method::POST,
            "/posts",
            Some(json!({"userId": 6, "title": "Hello", "content": "First post"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let post_id = post["postId"].as_i64().unwrap();

        let like = json!({"userId": 5, "postId": post_id});
        let (status, value) = send(&app, Method::POST, "/likes", Some(like.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(value["outcome"], "created");

        let (status, value) = send(&app, Method::POST, "/likes", Some(like.clone())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(value["outcome"], "alreadyLiked");

        send(
            &app,
            Method::POST,
            "/blocks",
            Some(json!({"blockerId": 5, "blockedId": 6})),
        )
        .await;

        let (status, value) = send(&app, Method::DELETE, "/likes", Some(like)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["outcome"], "removed");

        let (status, value) = send(
            &app,
            Method::POST,
            "/likes",
            Some(json!({"userId": 5, "postId": post_id})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(value["outcome"], "blocked");
    }

    #[tokio::test]
    async fn test_like_missing_post() {
        let app = app().await;
        let (status, value) = send(
            &app,
            Method::POST,
            "/likes",
            Some(json!({"userId": 1, "postId": 404})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(value["outcome"], "targetMissing");
    }

    #[tokio::test]
    async fn test_post_queries() {
        let app = app().await;

        let (status, value) = send(&app, Method::GET, "/posts", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, json!([]));

        send(
            &app,
            Method::POST,
            "/posts",
            Some(json!({"userId": 1, "title": "A", "content": "a"})),
        )
        .await;
        let (_, created) = send(
            &app,
            Method::POST,
            "/posts",
            Some(json!({"userId": 2, "title": "B", "content": "b"})),
        )
        .await;

        let (_, all) = send(&app, Method::GET, "/posts", None).await;
        assert_eq!(all.as_array().unwrap().len(), 2);
        assert_eq!(all[0]["title"], "B");

        let (_, mine) = send(&app, Method::GET, "/users/1/posts", None).await;
        assert_eq!(mine.as_array().unwrap().len(), 1);
        assert_eq!(mine[0]["title"], "A");

        let uri = format!("/posts/{}", created["postId"]);
        let (status, one) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(one["userId"], 2);

        let (status, _) = send(&app, Method::GET, "/posts/12345", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_post_validation() {
        let app = app().await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/posts",
            Some(json!({"userId": 1, "title": "   ", "content": "body"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(
            &app,
            Method::POST,
            "/posts",
            Some(json!({"userId": 77, "title": "t", "content": "body"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
