//! PostgreSQL implementation of the users repository.
//!
//! ## Database Tables
//!
//! - `users`: one row per external identity, unique on `external_id` and `username`
//! - `follows` and `posts` are read for the relationship counts
use async_trait::async_trait;
use social_graph_shared::types::{NewUser, User, UserId, UserProfile, UserSummary};
use uuid::Uuid;

use crate::errors::RepositoryError;
use crate::interfaces::{CreateOutcome, UsersRepository};
use crate::postgres::rows::{UserProfileRow, UserRow, UserSummaryRow};

const USER_COLUMNS: &str = "id, external_id, username, name, email, image, bio, created_at";

/// PostgreSQL-backed users repository.
pub struct PostgresUsersRepository {
    pool: sqlx::PgPool,
}

impl PostgresUsersRepository {
    /// Creates a repository over a pool whose schema has been migrated.
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsersRepository for PostgresUsersRepository {
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE external_id = $1"
        ))
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Inserts the user with `ON CONFLICT (external_id) DO NOTHING`.
    ///
    /// A conflicting insert returns no row, which is reported as
    /// `CreateOutcome::AlreadyExists`. Conflicts on `username` are not covered
    /// by the clause and surface as `RepositoryError::UniqueViolation`.
    async fn create_user(&self, user: &NewUser) -> Result<CreateOutcome<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, external_id, username, name, email, image)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (external_id) DO NOTHING
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&user.external_id)
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.image)
        .fetch_optional(&self.pool)
        .await?;

        Ok(match row {
            Some(row) => CreateOutcome::Created(row.into()),
            None => CreateOutcome::AlreadyExists,
        })
    }

    async fn profile_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<UserProfile>, RepositoryError> {
        let row = sqlx::query_as::<_, UserProfileRow>(
            r#"
            SELECT u.id, u.external_id, u.username, u.name, u.email, u.image, u.bio, u.created_at,
                (SELECT COUNT(*) FROM follows f WHERE f.following_id = u.id) AS followers,
                (SELECT COUNT(*) FROM follows f WHERE f.follower_id = u.id) AS following,
                (SELECT COUNT(*) FROM posts p WHERE p.author_id = u.id) AS posts
            FROM users u
            WHERE u.external_id = $1
            "#,
        )
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserProfile::from))
    }

    async fn sample_unconnected(
        &self,
        viewer: UserId,
        limit: usize,
    ) -> Result<Vec<UserSummary>, RepositoryError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, UserSummaryRow>(
            r#"
            SELECT u.id, u.username, u.name, u.image,
                (SELECT COUNT(*) FROM follows f WHERE f.following_id = u.id) AS followers
            FROM users u
            WHERE u.id <> $1
              AND NOT EXISTS (
                  SELECT 1 FROM follows f WHERE f.follower_id = $1 AND f.following_id = u.id
              )
            ORDER BY random()
            LIMIT $2
            "#,
        )
        .bind(viewer)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UserSummary::from).collect())
    }
}
