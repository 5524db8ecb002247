//! Row types decoded from query results.
use chrono::{DateTime, Utc};
use social_graph_shared::types::{
    Notification, NotificationKind, Post, User, UserProfile, UserSummary,
};
use uuid::Uuid;

use crate::errors::RepositoryError;

#[derive(sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub external_id: String,
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            external_id: row.external_id,
            username: row.username,
            name: row.name,
            email: row.email,
            image: row.image,
            bio: row.bio,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct UserProfileRow {
    #[sqlx(flatten)]
    pub user: UserRow,
    pub followers: i64,
    pub following: i64,
    pub posts: i64,
}

impl From<UserProfileRow> for UserProfile {
    fn from(row: UserProfileRow) -> Self {
        Self {
            user: row.user.into(),
            followers: row.followers,
            following: row.following,
            posts: row.posts,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct UserSummaryRow {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub image: Option<String>,
    pub followers: i64,
}

impl From<UserSummaryRow> for UserSummary {
    fn from(row: UserSummaryRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            name: row.name,
            image: row.image,
            followers: row.followers,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct NotificationRow {
    pub id: Uuid,
    pub kind: String,
    pub user_id: Uuid,
    pub creator_id: Uuid,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = RepositoryError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let kind = row
            .kind
            .parse::<NotificationKind>()
            .map_err(|_| RepositoryError::InvalidNotificationKind(row.kind.clone()))?;

        Ok(Self {
            id: row.id,
            kind,
            user_id: row.user_id,
            creator_id: row.creator_id,
            read: row.read,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct PostRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            author_id: row.author_id,
            content: row.content,
            image: row.image,
            created_at: row.created_at,
        }
    }
}
