//! Domain Services
//!
//! Pure functions with no I/O.

use std::collections::BTreeSet;

use kernel::id::UserId;

use crate::domain::edge::Edge;
use crate::domain::post::NewPost;
use crate::error::{SocialError, SocialResult};

/// Order-independent representation of a user pair
pub fn unordered_pair(a: i64, b: i64) -> (i64, i64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Lock key shared by every transaction on the pair `{a, b}`
pub fn pair_lock_key(a: i64, b: i64) -> String {
    let (lo, hi) = unordered_pair(a, b);
    format!("social-pair:{lo}:{hi}")
}

/// Drop every candidate that shares a block edge with `user`
///
/// Returns the visible set and the candidates that were hidden.
pub fn without_blocked(
    user: UserId,
    candidates: impl IntoIterator<Item = i64>,
    blocks: &[Edge],
) -> (BTreeSet<UserId>, Vec<UserId>) {
    let blocked: BTreeSet<i64> = blocks
        .iter()
        .map(|edge| edge.counterpart(user.get()))
        .collect();

    let mut visible = BTreeSet::new();
    let mut hidden = Vec::new();
    for id in candidates {
        if blocked.contains(&id) {
            hidden.push(UserId::new(id));
        } else {
            visible.insert(UserId::new(id));
        }
    }
    (visible, hidden)
}

/// Trim and bound-check post fields
pub fn validate_post(
    user_id: UserId,
    title: &str,
    content: &str,
    max_title: usize,
    max_content: usize,
) -> SocialResult<NewPost> {
    let title = title.trim();
    let content = content.trim();

    if title.is_empty() {
        return Err(SocialError::InvalidPost("title must not be blank".into()));
    }
    if content.is_empty() {
        return Err(SocialError::InvalidPost("content must not be blank".into()));
    }
    if title.chars().count() > max_title {
        return Err(SocialError::InvalidPost(format!(
            "title must be at most {max_title} characters"
        )));
    }
    if content.chars().count() > max_content {
        return Err(SocialError::InvalidPost(format!(
            "content must be at most {max_content} characters"
        )));
    }

    Ok(NewPost {
        user_id,
        title: title.to_string(),
        content: content.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_lock_key_ignores_direction() {
        assert_eq!(pair_lock_key(3, 4), pair_lock_key(4, 3));
        assert_eq!(pair_lock_key(3, 4), "social-pair:3:4");
        assert_ne!(pair_lock_key(3, 4), pair_lock_key(3, 5));
    }

    #[test]
    fn test_without_blocked_both_directions() {
        let user = UserId::new(1);
        let blocks = [
            Edge::block(UserId::new(1), UserId::new(2)),
            Edge::block(UserId::new(3), UserId::new(1)),
        ];
        let (visible, hidden) = without_blocked(user, [2, 3, 4], &blocks);

        assert_eq!(visible.into_iter().collect::<Vec<_>>(), vec![UserId::new(4)]);
        assert_eq!(hidden, vec![UserId::new(2), UserId::new(3)]);
    }

    #[test]
    fn test_validate_post_trims() {
        let post = validate_post(UserId::new(1), "  Hello ", " world ", 1000, 500).unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.content, "world");
    }

    #[test]
    fn test_validate_post_rejects_blank_and_long() {
        assert!(matches!(
            validate_post(UserId::new(1), "   ", "body", 1000, 500),
            Err(SocialError::InvalidPost(_))
        ));
        assert!(matches!(
            validate_post(UserId::new(1), "title", "", 1000, 500),
            Err(SocialError::InvalidPost(_))
        ));
        assert!(matches!(
            validate_post(UserId::new(1), &"t".repeat(11), "body", 10, 500),
            Err(SocialError::InvalidPost(_))
        ));
        assert!(validate_post(UserId::new(1), &"t".repeat(10), "body", 10, 500).is_ok());
    }
}
