//! Configuration module for the social graph service.
//! Reads settings from the environment and wires the repositories and
//! services they select.
mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::{Config, LogFormat, StoreSource};
