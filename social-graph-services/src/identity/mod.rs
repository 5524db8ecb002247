//! Identity boundary: the provider seam and the resolver built on it.
mod provider;
mod resolver;

pub use provider::{IdentityProvider, SessionIdentity};
pub use resolver::IdentityResolver;
