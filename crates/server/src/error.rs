//! Unified error handling.
//!
//! Provides a unified `AppError` type that maps service and repository
//! failures to HTTP responses. All route handlers return
//! `Result<T, AppError>`. Bodies are `{"message": "..."}` with the
//! messages the original API exposed; internal details are logged via
//! `tracing` and never sent to clients.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{AccountError, BookingError, ExperienceError};

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Account operation failed.
    #[error("account error: {0}")]
    Account(#[from] AccountError),

    /// Listing operation failed.
    #[error("experience error: {0}")]
    Experience(#[from] ExperienceError),

    /// Booking operation failed.
    #[error("booking error: {0}")]
    Booking(#[from] BookingError),

    /// Database operation failed outside a service.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Status code and client-facing message for this error.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Account(err) => match err {
                // The original returned 400, not 409, for duplicate email
                AccountError::EmailTaken => {
                    (StatusCode::BAD_REQUEST, "User already exists".to_owned())
                }
                AccountError::InvalidEmail(e) => (StatusCode::BAD_REQUEST, e.to_string()),
                // Login reports a missing account as a 400, per the original
                AccountError::UnknownEmail => {
                    (StatusCode::BAD_REQUEST, "User not found".to_owned())
                }
                AccountError::InvalidCredentials => {
                    (StatusCode::BAD_REQUEST, "Invalid credentials".to_owned())
                }
                AccountError::NotFound => (StatusCode::NOT_FOUND, "User not found".to_owned()),
                AccountError::Hash(_) | AccountError::Repository(_) => internal(),
            },
            Self::Experience(err) => match err {
                ExperienceError::OwnerNotFound => {
                    (StatusCode::BAD_REQUEST, "User not found".to_owned())
                }
                ExperienceError::InvalidImage => {
                    (StatusCode::BAD_REQUEST, "Invalid image format".to_owned())
                }
                ExperienceError::NotFound => {
                    (StatusCode::NOT_FOUND, "Experience not found".to_owned())
                }
                ExperienceError::Repository(_) => internal(),
            },
            Self::Booking(err) => match err {
                BookingError::MissingFields => {
                    (StatusCode::BAD_REQUEST, "All fields are required".to_owned())
                }
                BookingError::Repository(_) => internal(),
            },
            Self::Database(_) => internal(),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        }
    }
}

fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_owned(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request error");
        }

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.status_and_message().0
    }

    #[test]
    fn test_duplicate_email_is_400() {
        assert_eq!(
            status_of(AppError::Account(AccountError::EmailTaken)),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_login_unknown_email_is_400_but_profile_missing_is_404() {
        assert_eq!(
            status_of(AppError::Account(AccountError::UnknownEmail)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Account(AccountError::NotFound)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_missing_booking_fields_is_400() {
        let (status, message) =
            AppError::Booking(BookingError::MissingFields).status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "All fields are required");
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = AppError::Database(RepositoryError::DataCorruption(
            "secret table layout".to_owned(),
        ));
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("secret"));
    }

    #[test]
    fn test_missing_experience_is_404() {
        let (status, message) =
            AppError::Experience(ExperienceError::NotFound).status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "Experience not found");
    }
}
