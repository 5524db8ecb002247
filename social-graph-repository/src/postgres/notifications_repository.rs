//! PostgreSQL implementation of the notifications repository.
use async_trait::async_trait;
use social_graph_shared::types::{Notification, UserId};

use crate::errors::RepositoryError;
use crate::interfaces::NotificationsRepository;
use crate::postgres::rows::NotificationRow;

/// PostgreSQL-backed notification log reader.
///
/// Notifications are only written by `PostgresFollowsRepository::persist_follow`.
pub struct PostgresNotificationsRepository {
    pool: sqlx::PgPool,
}

impl PostgresNotificationsRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationsRepository for PostgresNotificationsRepository {
    async fn notifications_for(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            r#"
            SELECT id, kind, user_id, creator_id, read, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Notification::try_from).collect()
    }
}
