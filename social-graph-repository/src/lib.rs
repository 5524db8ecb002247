//! # Social Graph Repository
//! This crate provides the traits for persisting users, follow edges,
//! notifications and posts, the errors those operations return, and two
//! implementations: PostgreSQL for production and an in-memory store for
//! development and tests.
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod postgres;

pub use errors::RepositoryError;
pub use interfaces::{
    CreateOutcome, FollowsRepository, NotificationsRepository, PostsRepository, UsersRepository,
};
pub use memory::MemoryStore;
pub use postgres::{
    PostgresFollowsRepository, PostgresNotificationsRepository, PostgresPostsRepository,
    PostgresUsersRepository, MIGRATOR,
};
