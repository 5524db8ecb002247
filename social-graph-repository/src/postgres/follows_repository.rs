//! PostgreSQL implementation of the follows repository.
//!
//! Creating an edge and appending its FOLLOW notification share one
//! transaction. The `follows` primary key is what rejects a second edge for
//! the same pair when two requests race.
use async_trait::async_trait;
use social_graph_shared::types::{FollowChangeset, FollowEdge, NewNotification, UserId};
use tracing::debug;

use crate::errors::RepositoryError;
use crate::interfaces::FollowsRepository;

/// PostgreSQL-backed follow graph.
pub struct PostgresFollowsRepository {
    pool: sqlx::PgPool,
}

impl PostgresFollowsRepository {
    /// Creates a repository over a pool whose schema has been migrated.
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    /// Inserts an edge within an active transaction.
    async fn insert_edge_tx(
        &self,
        edge: &FollowEdge,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO follows (follower_id, following_id, created_at) VALUES ($1, $2, $3)",
        )
        .bind(edge.follower_id)
        .bind(edge.following_id)
        .bind(edge.created_at)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Appends a notification within an active transaction.
    async fn insert_notification_tx(
        &self,
        notification: &NewNotification,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO notifications (id, kind, user_id, creator_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(notification.id)
        .bind(notification.kind.as_str())
        .bind(notification.user_id)
        .bind(notification.creator_id)
        .bind(notification.created_at)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl FollowsRepository for PostgresFollowsRepository {
    async fn follow_exists(
        &self,
        follower: UserId,
        following: UserId,
    ) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND following_id = $2)",
        )
        .bind(follower)
        .bind(following)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Persists the edge and its notification in a single transaction.
    ///
    /// The transaction is rolled back when dropped, so any failure after
    /// `begin` leaves neither record behind.
    async fn persist_follow(&self, changeset: &FollowChangeset) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;
        self.insert_edge_tx(&changeset.edge, &mut tx).await?;
        self.insert_notification_tx(&changeset.notification, &mut tx).await?;
        tx.commit().await?;

        debug!(
            follower_id = %changeset.edge.follower_id,
            following_id = %changeset.edge.following_id,
            notification_id = %changeset.notification.id,
            "Persisted follow changeset"
        );
        Ok(())
    }

    async fn delete_follow(
        &self,
        follower: UserId,
        following: UserId,
    ) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
                .bind(follower)
                .bind(following)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
