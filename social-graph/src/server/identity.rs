//! Caller identity taken from headers set by the authenticating gateway.
//!
//! The gateway verifies the session and forwards its attributes; a request
//! without `x-auth-user-id` is anonymous.
use axum::http::HeaderMap;
use social_graph_services::SessionIdentity;
use social_graph_shared::types::VerifiedSession;

pub const USER_ID_HEADER: &str = "x-auth-user-id";
pub const FIRST_NAME_HEADER: &str = "x-auth-first-name";
pub const LAST_NAME_HEADER: &str = "x-auth-last-name";
pub const USERNAME_HEADER: &str = "x-auth-username";
pub const EMAIL_HEADER: &str = "x-auth-email";
pub const IMAGE_URL_HEADER: &str = "x-auth-image-url";

pub const IDENTITY_HEADERS: [&str; 6] = [
    USER_ID_HEADER,
    FIRST_NAME_HEADER,
    LAST_NAME_HEADER,
    USERNAME_HEADER,
    EMAIL_HEADER,
    IMAGE_URL_HEADER,
];

/// Builds the caller's identity from the forwarded session headers.
pub fn session_from_headers(headers: &HeaderMap) -> SessionIdentity {
    match header(headers, USER_ID_HEADER) {
        Some(external_id) => SessionIdentity::authenticated(VerifiedSession {
            external_id,
            first_name: header(headers, FIRST_NAME_HEADER),
            last_name: header(headers, LAST_NAME_HEADER),
            username: header(headers, USERNAME_HEADER),
            primary_email: header(headers, EMAIL_HEADER),
            image_url: header(headers, IMAGE_URL_HEADER),
        }),
        None => SessionIdentity::anonymous(),
    }
}

// Missing, non-UTF-8 and blank values all read as absent.
fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
