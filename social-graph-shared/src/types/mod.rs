mod follow;
mod notification;
mod post;
mod session;
mod user;

pub use follow::{FollowChangeset, FollowEdge};
pub use notification::{NewNotification, Notification, NotificationKind, ParseNotificationKindError};
pub use post::{NewPost, Post};
pub use session::VerifiedSession;
pub use user::{NewUser, User, UserProfile, UserSummary};

/// Internal, stable identifier of a user record.
pub type UserId = uuid::Uuid;

/// Identifier of a notification record.
pub type NotificationId = uuid::Uuid;

/// Identifier of a post record.
pub type PostId = uuid::Uuid;
