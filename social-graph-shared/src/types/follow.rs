use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{NewNotification, NotificationKind, UserId};

/// A directed follow relationship from `follower_id` to `following_id`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FollowEdge {
    pub follower_id: UserId,
    pub following_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// The writes produced by creating a follow edge.
///
/// A `FollowChangeset` bundles the new edge with the FOLLOW notification sent
/// to the followed user. Repositories persist both in one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowChangeset {
    pub edge: FollowEdge,
    pub notification: NewNotification,
}

impl FollowChangeset {
    /// Builds the edge `follower -> following` and its notification.
    ///
    /// Both records share one timestamp, so the notification is never dated
    /// before the edge.
    pub fn new(follower_id: UserId, following_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            edge: FollowEdge {
                follower_id,
                following_id,
                created_at: now,
            },
            notification: NewNotification {
                id: uuid::Uuid::new_v4(),
                kind: NotificationKind::Follow,
                user_id: following_id,
                creator_id: follower_id,
                created_at: now,
            },
        }
    }
}
