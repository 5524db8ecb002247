//! PostgreSQL implementations of the repository interfaces.
//!
//! Every repository wraps a shared `sqlx::PgPool`. The schema lives in the
//! crate's `migrations/` directory and is applied through [`MIGRATOR`].
mod follows_repository;
mod notifications_repository;
mod posts_repository;
mod rows;
mod users_repository;

pub use follows_repository::PostgresFollowsRepository;
pub use notifications_repository::PostgresNotificationsRepository;
pub use posts_repository::PostgresPostsRepository;
pub use users_repository::PostgresUsersRepository;

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
