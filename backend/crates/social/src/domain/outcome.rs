//! Operation Outcomes
//!
//! Each relationship operation returns its own closed set of results.
//! All of them collapse into the shared [`Outcome`] tag, which is what the
//! transport layer maps to a status.

use derive_more::Display;
use serde::Serialize;

/// Shared outcome tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    #[display("created")]
    Created,
    #[display("removed")]
    Removed,
    #[display("alreadyExists")]
    AlreadyExists,
    #[display("alreadyBlocked")]
    AlreadyBlocked,
    #[display("alreadyLiked")]
    AlreadyLiked,
    #[display("blocked")]
    Blocked,
    #[display("notFollowing")]
    NotFollowing,
    #[display("notBlocked")]
    NotBlocked,
    #[display("notLiked")]
    NotLiked,
    #[display("selfFollow")]
    SelfFollow,
    #[display("selfBlock")]
    SelfBlock,
    #[display("targetMissing")]
    TargetMissing,
}

impl Outcome {
    /// Whether the operation changed the edge set
    pub fn is_change(&self) -> bool {
        matches!(self, Outcome::Created | Outcome::Removed)
    }
}

/// Per-operation result with a human readable message
pub trait OperationOutcome: Copy + Into<Outcome> {
    fn message(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    Created,
    AlreadyExists,
    Blocked,
    SelfFollow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnfollowOutcome {
    Removed,
    NotFollowing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOutcome {
    Created,
    AlreadyBlocked,
    SelfBlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnblockOutcome {
    Removed,
    NotBlocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    Created,
    AlreadyLiked,
    Blocked,
    TargetMissing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlikeOutcome {
    Removed,
    NotLiked,
}

impl From<FollowOutcome> for Outcome {
    fn from(outcome: FollowOutcome) -> Self {
        match outcome {
            FollowOutcome::Created => Outcome::Created,
            FollowOutcome::AlreadyExists => Outcome::AlreadyExists,
            FollowOutcome::Blocked => Outcome::Blocked,
            FollowOutcome::SelfFollow => Outcome::SelfFollow,
        }
    }
}

impl OperationOutcome for FollowOutcome {
    fn message(&self) -> &'static str {
        match self {
            FollowOutcome::Created => "Followed successfully",
            FollowOutcome::AlreadyExists => "Already following",
            FollowOutcome::Blocked => "Cannot follow: a block exists between these users",
            FollowOutcome::SelfFollow => "Cannot follow yourself",
        }
    }
}

impl From<UnfollowOutcome> for Outcome {
    fn from(outcome: UnfollowOutcome) -> Self {
        match outcome {
            UnfollowOutcome::Removed => Outcome::Removed,
            UnfollowOutcome::NotFollowing => Outcome::NotFollowing,
        }
    }
}

impl OperationOutcome for UnfollowOutcome {
    fn message(&self) -> &'static str {
        match self {
            UnfollowOutcome::Removed => "Unfollowed successfully",
            UnfollowOutcome::NotFollowing => "Not following",
        }
    }
}

impl From<BlockOutcome> for Outcome {
    fn from(outcome: BlockOutcome) -> Self {
        match outcome {
            BlockOutcome::Created => Outcome::Created,
            BlockOutcome::AlreadyBlocked => Outcome::AlreadyBlocked,
            BlockOutcome::SelfBlock => Outcome::SelfBlock,
        }
    }
}

impl OperationOutcome for BlockOutcome {
    fn message(&self) -> &'static str {
        match self {
            BlockOutcome::Created => "Blocked successfully",
            BlockOutcome::AlreadyBlocked => "Already blocked",
            BlockOutcome::SelfBlock => "Cannot block yourself",
        }
    }
}

impl From<UnblockOutcome> for Outcome {
    fn from(outcome: UnblockOutcome) -> Self {
        match outcome {
            UnblockOutcome::Removed => Outcome::Removed,
            UnblockOutcome::NotBlocked => Outcome::NotBlocked,
        }
    }
}

impl OperationOutcome for UnblockOutcome {
    fn message(&self) -> &'static str {
        match self {
            UnblockOutcome::Removed => "Unblocked successfully",
            UnblockOutcome::NotBlocked => "Not blocked",
        }
    }
}

impl From<LikeOutcome> for Outcome {
    fn from(outcome: LikeOutcome) -> Self {
        match outcome {
            LikeOutcome::Created => Outcome::Created,
            LikeOutcome::AlreadyLiked => Outcome::AlreadyLiked,
            LikeOutcome::Blocked => Outcome::Blocked,
            LikeOutcome::TargetMissing => Outcome::TargetMissing,
        }
    }
}

impl OperationOutcome for LikeOutcome {
    fn message(&self) -> &'static str {
        match self {
            LikeOutcome::Created => "Liked successfully",
            LikeOutcome::AlreadyLiked => "Already liked",
            LikeOutcome::Blocked => "Cannot like: a block exists with the post's author",
            LikeOutcome::TargetMissing => "Post not found",
        }
    }
}

impl From<UnlikeOutcome> for Outcome {
    fn from(outcome: UnlikeOutcome) -> Self {
        match outcome {
            UnlikeOutcome::Removed => Outcome::Removed,
            UnlikeOutcome::NotLiked => Outcome::NotLiked,
        }
    }
}

impl OperationOutcome for UnlikeOutcome {
    fn message(&self) -> &'static str {
        match self {
            UnlikeOutcome::Removed => "Unliked successfully",
            UnlikeOutcome::NotLiked => "Not liked",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_tags_are_camel_case() {
        assert_eq!(Outcome::AlreadyExists.to_string(), "alreadyExists");
        assert_eq!(
            serde_json::to_string(&Outcome::TargetMissing).unwrap(),
            "\"targetMissing\""
        );
        assert_eq!(
            serde_json::to_string(&Outcome::SelfFollow).unwrap(),
            format!("\"{}\"", Outcome::SelfFollow)
        );
    }

    #[test]
    fn test_operation_outcomes_collapse_to_tags() {
        assert_eq!(Outcome::from(FollowOutcome::Blocked), Outcome::Blocked);
        assert_eq!(Outcome::from(LikeOutcome::Blocked), Outcome::Blocked);
        assert_eq!(Outcome::from(BlockOutcome::Created), Outcome::Created);
        assert_eq!(Outcome::from(UnblockOutcome::NotBlocked), Outcome::NotBlocked);
        assert_eq!(Outcome::from(UnlikeOutcome::Removed), Outcome::Removed);
    }

    #[test]
    fn test_is_change() {
        assert!(Outcome::Created.is_change());
        assert!(Outcome::Removed.is_change());
        assert!(!Outcome::AlreadyLiked.is_change());
        assert!(!Outcome::SelfBlock.is_change());
    }

    #[test]
    fn test_messages() {
        assert_eq!(FollowOutcome::AlreadyExists.message(), "Already following");
        assert_eq!(UnfollowOutcome::NotFollowing.message(), "Not following");
    }
}
