//! PostgreSQL implementation of the posts repository.
use async_trait::async_trait;
use social_graph_shared::types::{NewPost, Post};
use uuid::Uuid;

use crate::errors::RepositoryError;
use crate::interfaces::PostsRepository;
use crate::postgres::rows::PostRow;

pub struct PostgresPostsRepository {
    pool: sqlx::PgPool,
}

impl PostgresPostsRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostsRepository for PostgresPostsRepository {
    async fn create_post(&self, post: &NewPost) -> Result<Post, RepositoryError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (id, author_id, content, image)
            VALUES ($1, $2, $3, $4)
            RETURNING id, author_id, content, image, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(post.author_id)
        .bind(&post.content)
        .bind(&post.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}
