use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{PostId, UserId};

/// A persisted post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub content: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A post about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author_id: UserId,
    pub content: Option<String>,
    pub image: Option<String>,
}
