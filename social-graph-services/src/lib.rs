//! # Social Graph Services
//!
//! Request-scoped operations over the social graph repositories:
//!
//! - [`IdentityResolver`] maps a verified session to a user, creating it on first sight
//! - [`FollowOrchestrator`] flips a follow edge and writes the FOLLOW notification with it
//! - [`PeerSampler`] suggests users the caller does not follow yet
//! - [`PostPublisher`] creates posts for the caller
//! - [`ProfileReader`] reads profiles with counts and the caller's notifications
//!
//! Every service receives its repositories and its [`ViewInvalidator`]
//! explicitly; nothing here holds a global connection.
pub mod errors;
pub mod follow;
pub mod identity;
pub mod invalidation;
pub mod posts;
pub mod profile;
pub mod sampler;

pub use errors::{FollowError, IdentityError, PostError};
pub use follow::{FollowOrchestrator, FollowToggled};
pub use identity::{IdentityProvider, IdentityResolver, SessionIdentity};
pub use invalidation::{BroadcastInvalidator, HOME_PATH, ViewInvalidator};
pub use posts::PostPublisher;
pub use profile::ProfileReader;
pub use sampler::{DEFAULT_SAMPLE_SIZE, PeerSampler};
