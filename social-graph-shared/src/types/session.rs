use serde::{Deserialize, Serialize};

/// Session attributes handed over by the identity provider.
///
/// The provider has already verified the caller; nothing in this workspace
/// checks credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifiedSession {
    pub external_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub primary_email: Option<String>,
    pub image_url: Option<String>,
}

impl VerifiedSession {
    /// First and last name joined by a space, skipping blank parts.
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// The provider's username, or the local part of the primary email.
    pub fn handle(&self) -> Option<String> {
        if let Some(username) = self.username.as_deref().map(str::trim) {
            if !username.is_empty() {
                return Some(username.to_string());
            }
        }

        self.primary_email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .map(str::trim)
            .filter(|local| !local.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> VerifiedSession {
        VerifiedSession {
            external_id: "user_2abc".to_string(),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            username: None,
            primary_email: Some("ada@example.com".to_string()),
            image_url: None,
        }
    }

    #[test]
    fn handle_defaults_to_email_local_part() {
        assert_eq!(session().handle().as_deref(), Some("ada"));
    }

    #[test]
    fn handle_prefers_username() {
        let session = VerifiedSession {
            username: Some("countess".to_string()),
            ..session()
        };
        assert_eq!(session.handle().as_deref(), Some("countess"));
    }

    #[test]
    fn blank_username_falls_back_to_email() {
        let session = VerifiedSession {
            username: Some("  ".to_string()),
            ..session()
        };
        assert_eq!(session.handle().as_deref(), Some("ada"));
    }

    #[test]
    fn no_username_and_no_email_has_no_handle() {
        let session = VerifiedSession {
            primary_email: None,
            ..session()
        };
        assert_eq!(session.handle(), None);
    }

    #[test]
    fn display_name_skips_missing_parts() {
        assert_eq!(session().display_name().as_deref(), Some("Ada Lovelace"));

        let first_only = VerifiedSession {
            last_name: None,
            ..session()
        };
        assert_eq!(first_only.display_name().as_deref(), Some("Ada"));

        let nameless = VerifiedSession {
            first_name: None,
            last_name: Some(String::new()),
            ..session()
        };
        assert_eq!(nameless.display_name(), None);
    }
}
