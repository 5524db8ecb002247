//! Social Graph Service Library
//!
//! Configuration, dependency wiring and the HTTP shell around the social
//! graph services. The binary in `main.rs` only initializes logging and
//! starts the server.

pub mod config;
pub mod errors;
pub mod server;

pub use config::{Config, Dependencies, LogFormat, StoreSource};
pub use errors::AppError;
