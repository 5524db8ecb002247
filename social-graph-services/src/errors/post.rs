use thiserror::Error;

/// Failure kinds of post creation.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PostError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("A post needs content or an image")]
    EmptyPost,

    #[error("Failed to create post")]
    CreateFailed,
}
