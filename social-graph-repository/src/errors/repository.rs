//! Errors returned by every repository implementation.
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Represents errors that can occur within the repositories.
///
/// Constraint failures reported by the database are classified into their own
/// variants so callers can tell a lost race from a broken connection.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(sqlx::Error),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("Check constraint violated: {0}")]
    CheckViolation(String),

    #[error("Invalid notification kind: {0}")]
    InvalidNotificationKind(String),
}

impl RepositoryError {
    /// Returns true when the error is a unique constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, RepositoryError::UniqueViolation(_))
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let message = db_err.message().to_string();
            match db_err.kind() {
                ErrorKind::UniqueViolation => return RepositoryError::UniqueViolation(message),
                ErrorKind::ForeignKeyViolation => {
                    return RepositoryError::ForeignKeyViolation(message);
                }
                ErrorKind::CheckViolation => return RepositoryError::CheckViolation(message),
                _ => {}
            }
        }
        RepositoryError::DatabaseError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_stay_database_errors() {
        let err = RepositoryError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::DatabaseError(sqlx::Error::RowNotFound)));
        assert!(!err.is_unique_violation());
    }

    #[test]
    fn unique_violation_is_detected() {
        let err = RepositoryError::UniqueViolation("follows_pkey".to_string());
        assert!(err.is_unique_violation());
    }
}
