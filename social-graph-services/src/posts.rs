//! Post creation for the resolved caller.
use std::sync::Arc;

use social_graph_repository::PostsRepository;
use social_graph_shared::types::{NewPost, Post};
use tracing::{error, info};

use crate::errors::{IdentityError, PostError};
use crate::identity::{IdentityProvider, IdentityResolver};
use crate::invalidation::{HOME_PATH, ViewInvalidator};

pub struct PostPublisher {
    resolver: Arc<IdentityResolver>,
    posts: Arc<dyn PostsRepository>,
    invalidator: Arc<dyn ViewInvalidator>,
}

impl PostPublisher {
    pub fn new(
        resolver: Arc<IdentityResolver>,
        posts: Arc<dyn PostsRepository>,
        invalidator: Arc<dyn ViewInvalidator>,
    ) -> Self {
        Self {
            resolver,
            posts,
            invalidator,
        }
    }

    /// Creates a post authored by the caller and invalidates the home view.
    ///
    /// Blank content is stored as no content; a post must keep either
    /// content or an image.
    pub async fn create_post(
        &self,
        identity: &dyn IdentityProvider,
        content: &str,
        image: Option<String>,
    ) -> Result<Post, PostError> {
        let content = Some(content.trim()).filter(|c| !c.is_empty()).map(str::to_string);
        let image = image.filter(|i| !i.trim().is_empty());
        if content.is_none() && image.is_none() {
            return Err(PostError::EmptyPost);
        }

        let author_id = self
            .resolver
            .resolve_current_user_id(identity)
            .await
            .map_err(|e| match e {
                IdentityError::NotAuthenticated => PostError::NotAuthenticated,
                other => {
                    error!(error = %other, "Failed to resolve post author");
                    PostError::CreateFailed
                }
            })?;

        let post = self
            .posts
            .create_post(&NewPost {
                author_id,
                content,
                image,
            })
            .await
            .map_err(|e| {
                error!(author_id = %author_id, error = %e, "Failed to create post");
                PostError::CreateFailed
            })?;

        info!(post_id = %post.id, author_id = %author_id, "Created post");
        self.invalidator.invalidate(HOME_PATH);
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::SessionIdentity;
    use crate::invalidation::BroadcastInvalidator;
    use social_graph_repository::{MemoryStore, UsersRepository};
    use social_graph_shared::types::VerifiedSession;

    fn identity() -> SessionIdentity {
        SessionIdentity::authenticated(VerifiedSession {
            external_id: "ext_author".to_string(),
            username: Some("author".to_string()),
            ..Default::default()
        })
    }

    fn publisher(store: Arc<MemoryStore>, invalidator: Arc<BroadcastInvalidator>) -> PostPublisher {
        let resolver = Arc::new(IdentityResolver::new(store.clone()));
        PostPublisher::new(resolver, store, invalidator)
    }

    #[tokio::test]
    async fn post_is_created_and_home_invalidated() {
        let store = Arc::new(MemoryStore::new());
        let invalidator = Arc::new(BroadcastInvalidator::new(4));
        let mut invalidations = invalidator.subscribe();
        let publisher = publisher(store.clone(), invalidator);

        let post = publisher
            .create_post(&identity(), "  hello world ", None)
            .await
            .unwrap();

        assert_eq!(post.content.as_deref(), Some("hello world"));
        let author = store.find_by_external_id("ext_author").await.unwrap().unwrap();
        assert_eq!(post.author_id, author.id);
        assert_eq!(invalidations.recv().await.unwrap(), HOME_PATH);

        let profile = store.profile_by_external_id("ext_author").await.unwrap().unwrap();
        assert_eq!(profile.posts, 1);
    }

    #[tokio::test]
    async fn image_only_post_is_allowed() {
        let store = Arc::new(MemoryStore::new());
        let publisher = publisher(store, Arc::new(BroadcastInvalidator::new(4)));

        let post = publisher
            .create_post(&identity(), "", Some("https://img.example/1.png".to_string()))
            .await
            .unwrap();

        assert_eq!(post.content, None);
        assert_eq!(post.image.as_deref(), Some("https://img.example/1.png"));
    }

    #[tokio::test]
    async fn empty_post_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let publisher = publisher(store.clone(), Arc::new(BroadcastInvalidator::new(4)));

        let result = publisher.create_post(&identity(), "   ", None).await;

        assert_eq!(result.unwrap_err(), PostError::EmptyPost);
        assert_eq!(store.user_count().await, 0);
    }

    #[tokio::test]
    async fn anonymous_post_is_not_authenticated() {
        let store = Arc::new(MemoryStore::new());
        let publisher = publisher(store, Arc::new(BroadcastInvalidator::new(4)));

        let result = publisher
            .create_post(&SessionIdentity::anonymous(), "hello", None)
            .await;

        assert_eq!(result.unwrap_err(), PostError::NotAuthenticated);
    }
}
