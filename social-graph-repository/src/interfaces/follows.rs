use social_graph_shared::types::{FollowChangeset, UserId};

use crate::errors::RepositoryError;

/// Trait for the directed follow graph.
///
/// Edge creation only happens through [`FollowsRepository::persist_follow`],
/// which writes the edge and its notification as one unit.
#[async_trait::async_trait]
pub trait FollowsRepository: Send + Sync {
    /// Returns whether `follower` currently follows `following`.
    async fn follow_exists(
        &self,
        follower: UserId,
        following: UserId,
    ) -> Result<bool, RepositoryError>;

    /// Atomically inserts the edge and the notification of a changeset.
    ///
    /// Either both records are persisted or neither is. An existing edge for
    /// the same pair fails with `RepositoryError::UniqueViolation`.
    async fn persist_follow(&self, changeset: &FollowChangeset) -> Result<(), RepositoryError>;

    /// Deletes the edge, returning whether a row was removed.
    async fn delete_follow(
        &self,
        follower: UserId,
        following: UserId,
    ) -> Result<bool, RepositoryError>;
}
