use social_graph_shared::types::{NewPost, Post};

use crate::errors::RepositoryError;

#[async_trait::async_trait]
pub trait PostsRepository: Send + Sync {
    /// Persists a post and returns the stored record.
    async fn create_post(&self, post: &NewPost) -> Result<Post, RepositoryError>;
}
