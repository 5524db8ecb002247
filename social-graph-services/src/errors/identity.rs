use social_graph_repository::RepositoryError;
use thiserror::Error;

/// Errors raised while resolving the caller to a user record.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The identity provider yielded no session.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The identity resolved but no user row could be read back.
    #[error("User not found for external id {0}")]
    UserNotFound(String),

    /// The session carries neither a username nor an email to derive one from.
    #[error("Session for {0} has no usable handle")]
    MissingHandle(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
