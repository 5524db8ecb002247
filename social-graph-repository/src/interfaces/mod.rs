//! This module defines and re-exports the repository interfaces.
//! Services depend on these traits only, never on a concrete backend.
mod follows;
mod notifications;
mod posts;
mod users;

pub use follows::FollowsRepository;
pub use notifications::NotificationsRepository;
pub use posts::PostsRepository;
pub use users::{CreateOutcome, UsersRepository};
