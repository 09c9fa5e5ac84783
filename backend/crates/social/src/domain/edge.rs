//! Relationship Edges
//!
//! Follow, block and like relations share one representation: a kind tag
//! plus a directed `(source, target)` pair. For follows and blocks both ends
//! are users; for likes the target is a post.

use derive_more::Display;
use kernel::id::{PostId, UserId};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "camelCase")]
pub enum EdgeKind {
    #[display("follow")]
    Follow,
    #[display("block")]
    Block,
    #[display("like")]
    Like,
}

impl EdgeKind {
    /// Storage discriminant
    pub fn as_i16(self) -> i16 {
        match self {
            EdgeKind::Follow => 1,
            EdgeKind::Block => 2,
            EdgeKind::Like => 3,
        }
    }

    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            1 => Some(EdgeKind::Follow),
            2 => Some(EdgeKind::Block),
            3 => Some(EdgeKind::Like),
            _ => None,
        }
    }
}

/// A directed, immutable relation record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub kind: EdgeKind,
    pub source: i64,
    pub target: i64,
}

impl Edge {
    pub fn new(kind: EdgeKind, source: i64, target: i64) -> Self {
        Self {
            kind,
            source,
            target,
        }
    }

    pub fn follow(follower: UserId, followee: UserId) -> Self {
        Self::new(EdgeKind::Follow, follower.get(), followee.get())
    }

    pub fn block(blocker: UserId, blocked: UserId) -> Self {
        Self::new(EdgeKind::Block, blocker.get(), blocked.get())
    }

    pub fn like(liker: UserId, post: PostId) -> Self {
        Self::new(EdgeKind::Like, liker.get(), post.get())
    }

    /// The same relation pointing the other way
    pub fn reversed(&self) -> Self {
        Self::new(self.kind, self.target, self.source)
    }

    /// The other end of an edge that touches `id`
    pub fn counterpart(&self, id: i64) -> i64 {
        if self.source == id {
            self.target
        } else {
            self.source
        }
    }
}

/// Declarative edge selection, translatable to SQL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeFilter {
    /// Edges starting at the id
    Source(i64),
    /// Edges ending at the id
    Target(i64),
    /// Edges with the id at either end
    Touching(i64),
}

impl EdgeFilter {
    pub fn matches(&self, edge: &Edge) -> bool {
        match *self {
            EdgeFilter::Source(id) => edge.source == id,
            EdgeFilter::Target(id) => edge.target == id,
            EdgeFilter::Touching(id) => edge.source == id || edge.target == id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_discriminant_roundtrip() {
        for kind in [EdgeKind::Follow, EdgeKind::Block, EdgeKind::Like] {
            assert_eq!(EdgeKind::from_i16(kind.as_i16()), Some(kind));
        }
        assert_eq!(EdgeKind::from_i16(0), None);
    }

    #[test]
    fn test_reversed_and_counterpart() {
        let edge = Edge::block(UserId::new(1), UserId::new(2));
        assert_eq!(edge.reversed(), Edge::block(UserId::new(2), UserId::new(1)));
        assert_eq!(edge.counterpart(1), 2);
        assert_eq!(edge.counterpart(2), 1);
    }

    #[test]
    fn test_filter_matches() {
        let edge = Edge::follow(UserId::new(1), UserId::new(2));
        assert!(EdgeFilter::Source(1).matches(&edge));
        assert!(!EdgeFilter::Source(2).matches(&edge));
        assert!(EdgeFilter::Target(2).matches(&edge));
        assert!(EdgeFilter::Touching(1).matches(&edge));
        assert!(EdgeFilter::Touching(2).matches(&edge));
        assert!(!EdgeFilter::Touching(3).matches(&edge));
    }

    #[test]
    fn test_like_targets_post() {
        let edge = Edge::like(UserId::new(5), PostId::new(10));
        assert_eq!(edge.kind, EdgeKind::Like);
        assert_eq!((edge.source, edge.target), (5, 10));
    }
}
