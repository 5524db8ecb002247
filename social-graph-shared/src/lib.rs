//! # Social Graph Shared
//! This crate defines the data structures shared across the social graph
//! workspace: users, follow edges, notifications, posts and the verified
//! session handed over by the identity provider.
pub mod types;
