//! Dependency initialization and wiring for the social graph service.

use std::sync::Arc;

use social_graph_repository::{
    FollowsRepository, MemoryStore, NotificationsRepository, PostgresFollowsRepository,
    PostgresNotificationsRepository, PostgresPostsRepository, PostgresUsersRepository,
    PostsRepository, UsersRepository, MIGRATOR,
};
use social_graph_services::{
    BroadcastInvalidator, FollowOrchestrator, IdentityResolver, PeerSampler, PostPublisher,
    ProfileReader,
};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::config::{Config, StoreSource};
use crate::errors::AppError;

/// Signals buffered per invalidation subscriber before it starts lagging.
const INVALIDATION_CHANNEL_CAPACITY: usize = 64;

/// Container for all initialized services.
pub struct Dependencies {
    pub resolver: Arc<IdentityResolver>,
    pub follows: Arc<FollowOrchestrator>,
    pub sampler: Arc<PeerSampler>,
    pub posts: Arc<PostPublisher>,
    pub profiles: Arc<ProfileReader>,
    pub invalidator: Arc<BroadcastInvalidator>,
}

impl Dependencies {
    /// Initialize all dependencies for the configured store.
    ///
    /// For PostgreSQL this connects the pool and applies pending migrations
    /// before any service is built.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AppError)` - Connection or migration failure
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        match &config.store {
            StoreSource::Postgres {
                database_url,
                max_connections,
            } => {
                info!(max_connections, "Connecting to PostgreSQL");
                let pool = PgPoolOptions::new()
                    .max_connections(*max_connections)
                    .connect(database_url)
                    .await?;

                MIGRATOR.run(&pool).await?;
                info!("Database migrations applied");

                Ok(Self::wire(
                    Arc::new(PostgresUsersRepository::new(pool.clone())),
                    Arc::new(PostgresFollowsRepository::new(pool.clone())),
                    Arc::new(PostgresNotificationsRepository::new(pool.clone())),
                    Arc::new(PostgresPostsRepository::new(pool)),
                ))
            }
            StoreSource::Memory => {
                info!("Using in-memory store; data is lost on restart");
                Ok(Self::in_memory())
            }
        }
    }

    /// Wire every service over a single fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::wire(store.clone(), store.clone(), store.clone(), store)
    }

    fn wire(
        users: Arc<dyn UsersRepository>,
        follows: Arc<dyn FollowsRepository>,
        notifications: Arc<dyn NotificationsRepository>,
        posts: Arc<dyn PostsRepository>,
    ) -> Self {
        let invalidator = Arc::new(BroadcastInvalidator::new(INVALIDATION_CHANNEL_CAPACITY));
        let resolver = Arc::new(IdentityResolver::new(users.clone()));

        Self {
            follows: Arc::new(FollowOrchestrator::new(
                resolver.clone(),
                follows,
                invalidator.clone(),
            )),
            sampler: Arc::new(PeerSampler::new(resolver.clone(), users.clone())),
            posts: Arc::new(PostPublisher::new(
                resolver.clone(),
                posts,
                invalidator.clone(),
            )),
            profiles: Arc::new(ProfileReader::new(resolver.clone(), users, notifications)),
            resolver,
            invalidator,
        }
    }
}
