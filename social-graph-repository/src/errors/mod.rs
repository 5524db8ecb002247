//! Error types for the social graph repository.
mod repository;

pub use repository::RepositoryError;
