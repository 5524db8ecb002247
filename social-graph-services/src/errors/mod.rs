//! Error types returned at the service boundary.
mod follow;
mod identity;
mod post;

pub use follow::FollowError;
pub use identity::IdentityError;
pub use post::PostError;
