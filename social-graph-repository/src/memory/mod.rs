//! In-memory implementation of every repository interface.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use social_graph_repository::MemoryStore;
//!
//! let store = Arc::new(MemoryStore::new());
//! // The same store backs the users, follows, notifications and posts traits.
//! ```
//!
//! All tables sit behind one lock. A multi-record write checks every
//! constraint of every record while holding the write lock and only then
//! applies them, matching the all-or-nothing commit of the PostgreSQL backend.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use social_graph_shared::types::{
    FollowChangeset, FollowEdge, NewNotification, NewPost, NewUser, Notification, Post, User,
    UserId, UserProfile, UserSummary,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::RepositoryError;
use crate::interfaces::{
    CreateOutcome, FollowsRepository, NotificationsRepository, PostsRepository, UsersRepository,
};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    follows: BTreeMap<(UserId, UserId), FollowEdge>,
    notifications: Vec<Notification>,
    posts: Vec<Post>,
}

impl Tables {
    fn user_by_external_id(&self, external_id: &str) -> Option<&User> {
        self.users.values().find(|user| user.external_id == external_id)
    }

    fn followers_of(&self, user_id: UserId) -> i64 {
        self.follows.keys().filter(|(_, following)| *following == user_id).count() as i64
    }

    fn following_of(&self, user_id: UserId) -> i64 {
        self.follows.keys().filter(|(follower, _)| *follower == user_id).count() as i64
    }

    fn ensure_user(&self, user_id: UserId, constraint: &str) -> Result<(), RepositoryError> {
        if self.users.contains_key(&user_id) {
            Ok(())
        } else {
            Err(RepositoryError::ForeignKeyViolation(format!(
                "{constraint}: user {user_id} does not exist"
            )))
        }
    }

    fn check_edge(&self, edge: &FollowEdge) -> Result<(), RepositoryError> {
        if edge.follower_id == edge.following_id {
            return Err(RepositoryError::CheckViolation("follows_no_self_edge".to_string()));
        }
        self.ensure_user(edge.follower_id, "follows_follower_id_fkey")?;
        self.ensure_user(edge.following_id, "follows_following_id_fkey")?;

        if self.follows.contains_key(&(edge.follower_id, edge.following_id)) {
            return Err(RepositoryError::UniqueViolation("follows_pkey".to_string()));
        }
        Ok(())
    }

    fn check_notification(&self, notification: &NewNotification) -> Result<(), RepositoryError> {
        self.ensure_user(notification.user_id, "notifications_user_id_fkey")?;
        self.ensure_user(notification.creator_id, "notifications_creator_id_fkey")?;

        if self.notifications.iter().any(|existing| existing.id == notification.id) {
            return Err(RepositoryError::UniqueViolation("notifications_pkey".to_string()));
        }
        Ok(())
    }
}

/// In-memory store for development and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of notifications across all recipients.
    pub async fn notification_count(&self) -> usize {
        self.tables.read().await.notifications.len()
    }

    /// Total number of follow edges.
    pub async fn follow_count(&self) -> usize {
        self.tables.read().await.follows.len()
    }

    /// Total number of users.
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

#[async_trait]
impl UsersRepository for MemoryStore {
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<User>, RepositoryError> {
        Ok(self.tables.read().await.user_by_external_id(external_id).cloned())
    }

    async fn create_user(&self, user: &NewUser) -> Result<CreateOutcome<User>, RepositoryError> {
        let mut tables = self.tables.write().await;

        // Same precedence as ON CONFLICT (external_id) DO NOTHING
        if tables.user_by_external_id(&user.external_id).is_some() {
            return Ok(CreateOutcome::AlreadyExists);
        }
        if tables.users.values().any(|existing| existing.username == user.username) {
            return Err(RepositoryError::UniqueViolation("users_username_key".to_string()));
        }

        let created = User {
            id: Uuid::new_v4(),
            external_id: user.external_id.clone(),
            username: user.username.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            image: user.image.clone(),
            bio: None,
            created_at: Utc::now(),
        };
        tables.users.insert(created.id, created.clone());
        Ok(CreateOutcome::Created(created))
    }

    async fn profile_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<UserProfile>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.user_by_external_id(external_id).map(|user| UserProfile {
            followers: tables.followers_of(user.id),
            following: tables.following_of(user.id),
            posts: tables.posts.iter().filter(|post| post.author_id == user.id).count() as i64,
            user: user.clone(),
        }))
    }

    async fn sample_unconnected(
        &self,
        viewer: UserId,
        limit: usize,
    ) -> Result<Vec<UserSummary>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut candidates: Vec<&User> = tables
            .users
            .values()
            .filter(|user| user.id != viewer && !tables.follows.contains_key(&(viewer, user.id)))
            .collect();
        // Oldest accounts first so repeated calls agree.
        candidates.sort_by_key(|user| user.created_at);

        Ok(candidates
            .into_iter()
            .take(limit)
            .map(|user| UserSummary {
                id: user.id,
                username: user.username.clone(),
                name: user.name.clone(),
                image: user.image.clone(),
                followers: tables.followers_of(user.id),
            })
            .collect())
    }
}

#[async_trait]
impl FollowsRepository for MemoryStore {
    async fn follow_exists(
        &self,
        follower: UserId,
        following: UserId,
    ) -> Result<bool, RepositoryError> {
        Ok(self.tables.read().await.follows.contains_key(&(follower, following)))
    }

    async fn persist_follow(&self, changeset: &FollowChangeset) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.check_edge(&changeset.edge)?;
        tables.check_notification(&changeset.notification)?;

        let edge = changeset.edge;
        tables.follows.insert((edge.follower_id, edge.following_id), edge);
        tables.notifications.push(changeset.notification.clone().into());
        Ok(())
    }

    async fn delete_follow(
        &self,
        follower: UserId,
        following: UserId,
    ) -> Result<bool, RepositoryError> {
        Ok(self.tables.write().await.follows.remove(&(follower, following)).is_some())
    }
}

#[async_trait]
impl NotificationsRepository for MemoryStore {
    async fn notifications_for(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let tables = self.tables.read().await;
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(tables
            .notifications
            .iter()
            .rev()
            .filter(|notification| notification.user_id == user_id)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PostsRepository for MemoryStore {
    async fn create_post(&self, post: &NewPost) -> Result<Post, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.ensure_user(post.author_id, "posts_author_id_fkey")?;

        let created = Post {
            id: Uuid::new_v4(),
            author_id: post.author_id,
            content: post.content.clone(),
            image: post.image.clone(),
            created_at: Utc::now(),
        };
        tables.posts.push(created.clone());
        Ok(created)
    }
}
