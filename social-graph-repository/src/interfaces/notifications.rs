use social_graph_shared::types::{Notification, UserId};

use crate::errors::RepositoryError;

/// Trait for reading the append-only notification log.
#[async_trait::async_trait]
pub trait NotificationsRepository: Send + Sync {
    /// Notifications addressed to `user_id`, newest first.
    async fn notifications_for(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<Notification>, RepositoryError>;
}
