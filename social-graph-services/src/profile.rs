//! Read-side queries: profiles with counts and the caller's notifications.
use std::sync::Arc;

use social_graph_repository::{NotificationsRepository, RepositoryError, UsersRepository};
use social_graph_shared::types::{Notification, UserProfile};

use crate::errors::IdentityError;
use crate::identity::{IdentityProvider, IdentityResolver};

pub struct ProfileReader {
    resolver: Arc<IdentityResolver>,
    users: Arc<dyn UsersRepository>,
    notifications: Arc<dyn NotificationsRepository>,
}

impl ProfileReader {
    pub fn new(
        resolver: Arc<IdentityResolver>,
        users: Arc<dyn UsersRepository>,
        notifications: Arc<dyn NotificationsRepository>,
    ) -> Self {
        Self {
            resolver,
            users,
            notifications,
        }
    }

    /// Returns the user holding `external_id` with follower, following and post counts.
    pub async fn user_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<UserProfile>, RepositoryError> {
        self.users.profile_by_external_id(external_id).await
    }

    /// Returns the caller's latest `limit` notifications, newest first.
    pub async fn notifications_for(
        &self,
        identity: &dyn IdentityProvider,
        limit: i64,
    ) -> Result<Vec<Notification>, IdentityError> {
        let user_id = self.resolver.resolve_current_user_id(identity).await?;
        Ok(self.notifications.notifications_for(user_id, limit).await?)
    }
}
