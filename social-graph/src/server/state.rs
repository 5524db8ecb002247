// App state for the Axum server
use std::sync::Arc;

use social_graph_services::{
    BroadcastInvalidator, FollowOrchestrator, IdentityResolver, PeerSampler, PostPublisher,
    ProfileReader,
};

use crate::config::Dependencies;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<IdentityResolver>,
    pub follows: Arc<FollowOrchestrator>,
    pub sampler: Arc<PeerSampler>,
    pub posts: Arc<PostPublisher>,
    pub profiles: Arc<ProfileReader>,
    pub invalidator: Arc<BroadcastInvalidator>,
    /// Suggestions returned when the request has no `limit`.
    pub suggested_limit: usize,
}

impl AppState {
    pub fn new(deps: Dependencies, suggested_limit: usize) -> Self {
        Self {
            resolver: deps.resolver,
            follows: deps.follows,
            sampler: deps.sampler,
            posts: deps.posts,
            profiles: deps.profiles,
            invalidator: deps.invalidator,
            suggested_limit,
        }
    }
}
