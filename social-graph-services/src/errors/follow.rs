use thiserror::Error;

/// Failure kinds of a follow toggle.
///
/// Storage errors never cross the orchestrator boundary; they are logged and
/// reported as `ToggleFailed`.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FollowError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("You cannot follow yourself")]
    SelfFollow,

    #[error("User not found")]
    UserNotFound,

    #[error("Failed to toggle follow")]
    ToggleFailed,
}
