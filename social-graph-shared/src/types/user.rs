use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// A persisted user record.
///
/// Created the first time an external identity is resolved and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    /// Identifier issued by the identity provider. Unique across users.
    pub external_id: String,
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a user; the repository assigns the id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub external_id: String,
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

/// Compact view of a user used for suggestions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub name: Option<String>,
    pub image: Option<String>,
    pub followers: i64,
}

/// A user together with its relationship and post counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub followers: i64,
    pub following: i64,
    pub posts: i64,
}
