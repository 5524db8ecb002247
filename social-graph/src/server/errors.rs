// Mapping of service failures to HTTP responses
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use social_graph_repository::RepositoryError;
use social_graph_services::{FollowError, IdentityError, PostError};
use tracing::error;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// A failed request: status code plus the message shown to the client.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    fn internal(cause: &dyn std::fmt::Display) -> Self {
        error!(error = %cause, "Request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match &err {
            IdentityError::NotAuthenticated => {
                Self::new(StatusCode::UNAUTHORIZED, err.to_string())
            }
            IdentityError::UserNotFound(_) => Self::not_found("User not found"),
            IdentityError::MissingHandle(_) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            IdentityError::Repository(_) => Self::internal(&err),
        }
    }
}

impl From<FollowError> for ApiError {
    fn from(err: FollowError) -> Self {
        let status = match err {
            FollowError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            FollowError::SelfFollow => StatusCode::BAD_REQUEST,
            FollowError::UserNotFound => StatusCode::NOT_FOUND,
            FollowError::ToggleFailed => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        let status = match err {
            PostError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            PostError::EmptyPost => StatusCode::UNPROCESSABLE_ENTITY,
            PostError::CreateFailed => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        Self::internal(&err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({
                "status": "error",
                "message": self.message,
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_errors_map_to_statuses() {
        assert_eq!(
            ApiError::from(FollowError::NotAuthenticated).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(FollowError::SelfFollow).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(FollowError::UserNotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(FollowError::ToggleFailed).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_details_are_not_exposed() {
        let err = ApiError::from(IdentityError::Repository(RepositoryError::DatabaseError(
            sqlx::Error::PoolTimedOut,
        )));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, INTERNAL_MESSAGE);
    }
}
