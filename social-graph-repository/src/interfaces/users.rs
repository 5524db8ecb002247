use social_graph_shared::types::{NewUser, User, UserId, UserProfile, UserSummary};

use crate::errors::RepositoryError;

/// Result of a create that is guarded by a uniqueness constraint.
///
/// Losing a creation race is an expected outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome<T> {
    Created(T),
    AlreadyExists,
}

/// Trait for reading and creating user records.
#[async_trait::async_trait]
pub trait UsersRepository: Send + Sync {
    /// Looks a user up by the identity provider's identifier.
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<User>, RepositoryError>;

    /// Creates a user unless one with the same external id already exists.
    ///
    /// # Returns
    ///
    /// * `Ok(CreateOutcome::Created(user))` - The new record
    /// * `Ok(CreateOutcome::AlreadyExists)` - Another record holds `external_id`
    /// * `Err(RepositoryError::UniqueViolation)` - The username is taken by a
    ///   different user
    async fn create_user(&self, user: &NewUser) -> Result<CreateOutcome<User>, RepositoryError>;

    /// Returns the user with its follower, following and post counts.
    async fn profile_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<UserProfile>, RepositoryError>;

    /// Returns up to `limit` users other than `viewer` that `viewer` does not follow.
    async fn sample_unconnected(
        &self,
        viewer: UserId,
        limit: usize,
    ) -> Result<Vec<UserSummary>, RepositoryError>;
}
