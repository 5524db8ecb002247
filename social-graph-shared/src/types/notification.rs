use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{NotificationId, UserId};

/// Kind of a user-facing notification.
///
/// Only `Follow` is emitted in this workspace. `Like` and `Comment` are
/// accepted by the store for post interactions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    Follow,
    Like,
    Comment,
}

impl NotificationKind {
    /// Database representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Follow => "FOLLOW",
            NotificationKind::Like => "LIKE",
            NotificationKind::Comment => "COMMENT",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored kind string that is not one of [`NotificationKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown notification kind: {0}")]
pub struct ParseNotificationKindError(pub String);

impl FromStr for NotificationKind {
    type Err = ParseNotificationKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FOLLOW" => Ok(NotificationKind::Follow),
            "LIKE" => Ok(NotificationKind::Like),
            "COMMENT" => Ok(NotificationKind::Comment),
            other => Err(ParseNotificationKindError(other.to_string())),
        }
    }
}

/// A persisted notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    /// Recipient of the notification.
    pub user_id: UserId,
    /// User whose action produced the notification.
    pub creator_id: UserId,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// A notification about to be appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub user_id: UserId,
    pub creator_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl From<NewNotification> for Notification {
    fn from(value: NewNotification) -> Self {
        Self {
            id: value.id,
            kind: value.kind,
            user_id: value.user_id,
            creator_id: value.creator_id,
            read: false,
            created_at: value.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_its_database_name() {
        for kind in [NotificationKind::Follow, NotificationKind::Like, NotificationKind::Comment] {
            assert_eq!(kind.as_str().parse::<NotificationKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = "MENTION".parse::<NotificationKind>().unwrap_err();
        assert_eq!(err, ParseNotificationKindError("MENTION".to_string()));
        assert_eq!(err.to_string(), "unknown notification kind: MENTION");
    }
}
