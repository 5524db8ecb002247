//! Resolution of a verified session to an internal user.
//!
//! The first time an external identity is seen a user row is created from the
//! session's profile attributes. Two requests racing on that first sight are
//! settled by the unique `external_id` constraint: the loser gets
//! `CreateOutcome::AlreadyExists` and reads the winner's row.
//!
//! Usernames are unique as well. When the derived handle belongs to another
//! identity the create is retried once with a suffix taken from the external
//! id, so the suffixed handle is stable for that identity.
use std::sync::Arc;

use social_graph_repository::{CreateOutcome, UsersRepository};
use social_graph_shared::types::{NewUser, User, UserId, VerifiedSession};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::IdentityError;
use crate::identity::IdentityProvider;

/// Characters of the external id appended to a taken handle.
const HANDLE_SUFFIX_LEN: usize = 8;

/// Maps the caller's session to a [`User`], creating it on first sight.
pub struct IdentityResolver {
    users: Arc<dyn UsersRepository>,
}

impl IdentityResolver {
    pub fn new(users: Arc<dyn UsersRepository>) -> Self {
        Self { users }
    }

    /// Returns the internal id of the caller.
    ///
    /// # Errors
    ///
    /// * `IdentityError::NotAuthenticated` - The provider has no session
    /// * `IdentityError::UserNotFound` - The row vanished after a lost creation race
    /// * `IdentityError::MissingHandle` - A new user could not be given a username
    /// * `IdentityError::Repository` - Storage failure, including a suffixed
    ///   handle that is taken too
    pub async fn resolve_current_user_id(
        &self,
        identity: &dyn IdentityProvider,
    ) -> Result<UserId, IdentityError> {
        self.sync_user(identity).await.map(|user| user.id)
    }

    /// Returns the caller's user record, creating it if needed.
    pub async fn sync_user(&self, identity: &dyn IdentityProvider) -> Result<User, IdentityError> {
        let session = identity
            .session()
            .await?
            .filter(|session| !session.external_id.is_empty())
            .ok_or(IdentityError::NotAuthenticated)?;

        if let Some(user) = self.users.find_by_external_id(&session.external_id).await? {
            return Ok(user);
        }

        let new_user = new_user_from_session(&session)?;
        let outcome = match self.users.create_user(&new_user).await {
            Err(e) if e.is_unique_violation() => {
                let username = disambiguated_handle(&new_user.username, &session.external_id);
                warn!(
                    external_id = %session.external_id,
                    taken = %new_user.username,
                    username = %username,
                    "Handle taken by another user, retrying with suffix"
                );
                self.users
                    .create_user(&NewUser {
                        username,
                        ..new_user
                    })
                    .await?
            }
            other => other?,
        };

        match outcome {
            CreateOutcome::Created(user) => {
                info!(
                    user_id = %user.id,
                    external_id = %user.external_id,
                    username = %user.username,
                    "Created user on first sight"
                );
                Ok(user)
            }
            CreateOutcome::AlreadyExists => {
                debug!(
                    external_id = %session.external_id,
                    "User created concurrently, reading it back"
                );
                self.users
                    .find_by_external_id(&session.external_id)
                    .await?
                    .ok_or(IdentityError::UserNotFound(session.external_id))
            }
        }
    }
}

fn new_user_from_session(session: &VerifiedSession) -> Result<NewUser, IdentityError> {
    let username = session
        .handle()
        .ok_or_else(|| IdentityError::MissingHandle(session.external_id.clone()))?;

    Ok(NewUser {
        external_id: session.external_id.clone(),
        username,
        name: session.display_name(),
        email: session.primary_email.clone(),
        image: session.image_url.clone(),
    })
}

fn disambiguated_handle(handle: &str, external_id: &str) -> String {
    let chars: Vec<char> = external_id
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    let suffix = if chars.is_empty() {
        Uuid::new_v4().simple().to_string()[..HANDLE_SUFFIX_LEN].to_string()
    } else {
        chars[chars.len().saturating_sub(HANDLE_SUFFIX_LEN)..]
            .iter()
            .collect()
    };
    format!("{handle}-{suffix}")
}
