use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::store::StoreError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid user ID: {0}")]
    InvalidUserId(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Missing required fields")]
    MissingFields,

    #[error("Email already exists")]
    EmailExists,

    #[error("{context}: {source}")]
    Internal {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Maps a store failure for the operation named by `context`.
    pub fn from_store(context: &'static str, source: StoreError) -> Self {
        match source {
            StoreError::EmailTaken(_) => AppError::EmailExists,
            source => AppError::Internal { context, source },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidUserId(_) => StatusCode::BAD_REQUEST,
            AppError::UserNotFound(_) => StatusCode::NOT_FOUND,
            AppError::MissingFields => StatusCode::BAD_REQUEST,
            AppError::EmailExists => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label sent as the `error` field.
    pub fn label(&self) -> &'static str {
        match self {
            AppError::InvalidUserId(_) => "Invalid user ID",
            AppError::UserNotFound(_) => "User not found",
            AppError::MissingFields => "Missing required fields",
            AppError::EmailExists => "Email already exists",
            AppError::Internal { context, .. } => context,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AppError::InvalidUserId(_) => "User ID must be a number".to_string(),
            AppError::UserNotFound(id) => format!("No user found with ID {}", id),
            AppError::MissingFields => "Name and email are required".to_string(),
            AppError::EmailExists => "A user with this email already exists".to_string(),
            AppError::Internal { source, .. } => source.to_string(),
        }
    }

    fn log(&self) {
        match self {
            AppError::Internal { context, source } => {
                error!(error = ?source, context = %context, "Internal error");
            }
            _ => {
                warn!(error = %self, status = %self.status_code(), "Request rejected");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        error_response(self.status_code(), self.label(), self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InvalidUserId("abc".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::UserNotFound("9999".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::MissingFields.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::EmailExists.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_from_store_maps_duplicate_to_conflict() {
        let err = AppError::from_store(
            "Failed to create user",
            StoreError::EmailTaken("a@b.c".to_string()),
        );
        assert!(matches!(err, AppError::EmailExists));
    }

    #[test]
    fn test_internal_keeps_context_and_source_text() {
        let err = AppError::from_store("Failed to create user", StoreError::IdSpaceExhausted);

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.label(), "Failed to create user");
        assert_eq!(err.message(), "No user ids left to assign");
    }

    #[test]
    fn test_not_found_message_names_id() {
        let err = AppError::UserNotFound("9999".to_string());
        assert_eq!(err.message(), "No user found with ID 9999");
    }
}
