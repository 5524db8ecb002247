//! Suggestions of users the caller is not connected to yet.
use std::sync::Arc;

use social_graph_repository::UsersRepository;
use social_graph_shared::types::UserSummary;
use tracing::warn;

use crate::identity::{IdentityProvider, IdentityResolver};

/// Number of suggestions returned when the caller does not ask for a size.
pub const DEFAULT_SAMPLE_SIZE: usize = 3;

pub struct PeerSampler {
    resolver: Arc<IdentityResolver>,
    users: Arc<dyn UsersRepository>,
}

impl PeerSampler {
    pub fn new(resolver: Arc<IdentityResolver>, users: Arc<dyn UsersRepository>) -> Self {
        Self { resolver, users }
    }

    /// Returns up to `n` users that are neither the caller nor followed by them.
    ///
    /// Order is unspecified. Any failure, including an unauthenticated caller,
    /// yields an empty list.
    pub async fn sample_unconnected_users(
        &self,
        identity: &dyn IdentityProvider,
        n: usize,
    ) -> Vec<UserSummary> {
        if n == 0 {
            return Vec::new();
        }

        let viewer = match self.resolver.resolve_current_user_id(identity).await {
            Ok(viewer) => viewer,
            Err(e) => {
                warn!(error = %e, "Cannot sample users for unresolved caller");
                return Vec::new();
            }
        };

        self.users
            .sample_unconnected(viewer, n)
            .await
            .unwrap_or_else(|e| {
                warn!(viewer_id = %viewer, error = %e, "Failed to sample users");
                Vec::new()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::SessionIdentity;
    use social_graph_repository::{FollowsRepository, MemoryStore};
    use social_graph_shared::types::{FollowChangeset, UserId, VerifiedSession};

    fn identity(name: &str) -> SessionIdentity {
        SessionIdentity::authenticated(VerifiedSession {
            external_id: format!("ext_{name}"),
            username: Some(name.to_string()),
            ..Default::default()
        })
    }

    async fn seed(resolver: &IdentityResolver, name: &str) -> UserId {
        resolver.resolve_current_user_id(&identity(name)).await.unwrap()
    }

    #[tokio::test]
    async fn sample_skips_self_and_followed_users() {
        let store = Arc::new(MemoryStore::new());
        let resolver = Arc::new(IdentityResolver::new(store.clone()));
        let sampler = PeerSampler::new(resolver.clone(), store.clone());

        let viewer = seed(&resolver, "viewer").await;
        let followed = seed(&resolver, "followed").await;
        let mut strangers = Vec::new();
        for name in ["s1", "s2", "s3", "s4"] {
            strangers.push(seed(&resolver, name).await);
        }
        store.persist_follow(&FollowChangeset::new(viewer, followed)).await.unwrap();

        let sample = sampler
            .sample_unconnected_users(&identity("viewer"), DEFAULT_SAMPLE_SIZE)
            .await;

        assert_eq!(sample.len(), 3);
        for summary in &sample {
            assert_ne!(summary.id, viewer);
            assert_ne!(summary.id, followed);
            assert!(strangers.contains(&summary.id));
        }
    }

    #[tokio::test]
    async fn sample_returns_fewer_when_few_candidates() {
        let store = Arc::new(MemoryStore::new());
        let resolver = Arc::new(IdentityResolver::new(store.clone()));
        let sampler = PeerSampler::new(resolver.clone(), store.clone());
        seed(&resolver, "viewer").await;
        seed(&resolver, "only").await;

        let sample = sampler.sample_unconnected_users(&identity("viewer"), 5).await;

        assert_eq!(sample.len(), 1);
        assert_eq!(sample[0].username, "only");
    }

    #[tokio::test]
    async fn unresolved_caller_gets_empty_sample() {
        let store = Arc::new(MemoryStore::new());
        let resolver = Arc::new(IdentityResolver::new(store.clone()));
        let sampler = PeerSampler::new(resolver.clone(), store.clone());
        seed(&resolver, "someone").await;

        let sample = sampler
            .sample_unconnected_users(&SessionIdentity::anonymous(), DEFAULT_SAMPLE_SIZE)
            .await;

        assert!(sample.is_empty());
    }

    #[tokio::test]
    async fn zero_sized_sample_is_empty() {
        let store = Arc::new(MemoryStore::new());
        let resolver = Arc::new(IdentityResolver::new(store.clone()));
        let sampler = PeerSampler::new(resolver.clone(), store.clone());
        seed(&resolver, "viewer").await;
        seed(&resolver, "other").await;

        assert!(sampler.sample_unconnected_users(&identity("viewer"), 0).await.is_empty());
    }
}
