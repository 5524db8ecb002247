use social_graph_shared::types::VerifiedSession;

use crate::errors::IdentityError;

/// Source of the caller's verified session.
///
/// Implementations sit in front of the hosted identity provider. Returning
/// `Ok(None)` means the request carries no authenticated session.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn session(&self) -> Result<Option<VerifiedSession>, IdentityError>;
}

/// An identity whose session was already extracted, e.g. from request headers
/// set by the authenticating gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionIdentity(Option<VerifiedSession>);

impl SessionIdentity {
    pub fn authenticated(session: VerifiedSession) -> Self {
        Self(Some(session))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

#[async_trait::async_trait]
impl IdentityProvider for SessionIdentity {
    async fn session(&self) -> Result<Option<VerifiedSession>, IdentityError> {
        Ok(self.0.clone())
    }
}
