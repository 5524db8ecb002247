//! The follow toggle.
//!
//! Flipping an edge either deletes it, with no side effect, or persists a
//! [`FollowChangeset`]: the edge plus a FOLLOW notification for the followed
//! user, committed together. Racing requests are not serialized here; the
//! store's unique constraint on the edge rejects the second create, which is
//! reported as [`FollowError::ToggleFailed`].
use std::sync::Arc;

use social_graph_repository::{FollowsRepository, RepositoryError};
use social_graph_shared::types::{FollowChangeset, UserId};
use tracing::{error, info, warn};

use crate::errors::{FollowError, IdentityError};
use crate::identity::{IdentityProvider, IdentityResolver};
use crate::invalidation::{HOME_PATH, ViewInvalidator};

/// Outcome of a successful toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowToggled {
    /// The edge was created and the FOLLOW notification appended.
    Created,
    /// The edge was removed.
    Removed,
}

impl FollowToggled {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowToggled::Created => "created",
            FollowToggled::Removed => "removed",
        }
    }
}

/// Owns the follow toggle and its atomic notification side effect.
pub struct FollowOrchestrator {
    resolver: Arc<IdentityResolver>,
    follows: Arc<dyn FollowsRepository>,
    invalidator: Arc<dyn ViewInvalidator>,
}

impl FollowOrchestrator {
    pub fn new(
        resolver: Arc<IdentityResolver>,
        follows: Arc<dyn FollowsRepository>,
        invalidator: Arc<dyn ViewInvalidator>,
    ) -> Self {
        Self {
            resolver,
            follows,
            invalidator,
        }
    }

    /// Toggles the caller's follow of `target`.
    ///
    /// The caller is resolved through `identity` first; see
    /// [`FollowOrchestrator::toggle_follow_for`] for the toggle itself.
    pub async fn toggle_follow(
        &self,
        identity: &dyn IdentityProvider,
        target: UserId,
    ) -> Result<FollowToggled, FollowError> {
        let viewer = match self.resolver.resolve_current_user_id(identity).await {
            Ok(viewer) => viewer,
            Err(IdentityError::NotAuthenticated) => return Err(FollowError::NotAuthenticated),
            Err(IdentityError::UserNotFound(external_id)) => {
                warn!(external_id = %external_id, "Resolved identity has no user row");
                return Err(FollowError::UserNotFound);
            }
            Err(e) => {
                error!(error = %e, "Failed to resolve viewer");
                return Err(FollowError::ToggleFailed);
            }
        };

        self.toggle_follow_for(viewer, target).await
    }

    /// Toggles the edge `viewer -> target`.
    ///
    /// # Returns
    ///
    /// * `Ok(FollowToggled::Created)` - Edge and notification committed
    /// * `Ok(FollowToggled::Removed)` - Edge deleted, no notification written
    /// * `Err(FollowError::SelfFollow)` - `viewer == target`, nothing written
    /// * `Err(FollowError::ToggleFailed)` - Storage failure, nothing written
    pub async fn toggle_follow_for(
        &self,
        viewer: UserId,
        target: UserId,
    ) -> Result<FollowToggled, FollowError> {
        if viewer == target {
            return Err(FollowError::SelfFollow);
        }

        let toggled = self.flip(viewer, target).await.map_err(|e| {
            error!(
                viewer_id = %viewer,
                target_id = %target,
                error = %e,
                "Failed to toggle follow"
            );
            FollowError::ToggleFailed
        })?;

        info!(
            viewer_id = %viewer,
            target_id = %target,
            outcome = toggled.as_str(),
            "Toggled follow"
        );
        self.invalidator.invalidate(HOME_PATH);

        Ok(toggled)
    }

    async fn flip(&self, viewer: UserId, target: UserId) -> Result<FollowToggled, RepositoryError> {
        if self.follows.follow_exists(viewer, target).await? {
            // A concurrent unfollow may already have removed the row; the end state is the same.
            self.follows.delete_follow(viewer, target).await?;
            return Ok(FollowToggled::Removed);
        }

        self.follows
            .persist_follow(&FollowChangeset::new(viewer, target))
            .await?;
        Ok(FollowToggled::Created)
    }
}
