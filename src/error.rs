use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;

/// Message returned for every failure that is not the caller's fault.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong please try again later";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {message}")]
    Auth { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Email error: {0}")]
    Email(String),
}

/// Body of every error response.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    /// Status code and client-facing message. Unexpected failures collapse
    /// into the generic message.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Auth { message } => (StatusCode::UNAUTHORIZED, message.clone()),
            AppError::Forbidden { message } => (StatusCode::FORBIDDEN, message.clone()),
            AppError::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { resource } => (
                StatusCode::NOT_FOUND,
                format!("{} Does not exist", resource),
            ),
            AppError::Jwt(_) => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),
            _ => (StatusCode::BAD_REQUEST, GENERIC_ERROR_MESSAGE.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::Database(ref e) => tracing::error!(error = %e, "Database error"),
            AppError::Pool(ref e) => tracing::error!(error = %e, "Connection pool error"),
            AppError::Redis(ref e) => tracing::error!(error = %e, "Redis error"),
            AppError::Serialization(ref e) => tracing::error!(error = %e, "Serialization error"),
            AppError::Config(ref e) => tracing::error!(error = %e, "Configuration error"),
            AppError::Email(ref e) => tracing::error!(error = %e, "Email error"),
            AppError::Jwt(ref e) => tracing::warn!(error = %e, "JWT error"),
            _ => {}
        }

        let (status, error) = self.status_and_message();
        (status, Json(ErrorBody { error })).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }
}

impl From<lettre::error::Error> for AppError {
    fn from(e: lettre::error::Error) -> Self {
        AppError::Email(e.to_string())
    }
}

impl From<lettre::address::AddressError> for AppError {
    fn from(e: lettre::address::AddressError) -> Self {
        AppError::Email(e.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for AppError {
    fn from(e: lettre::transport::smtp::Error) -> Self {
        AppError::Email(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request_with_message() {
        let (status, message) =
            AppError::validation("x-axis and y-axis dimensions are required").status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "x-axis and y-axis dimensions are required");
    }

    #[test]
    fn test_not_found_message() {
        let (status, message) = AppError::not_found("Analytic View").status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "Analytic View Does not exist");
    }

    #[test]
    fn test_unexpected_errors_are_generic_client_errors() {
        let (status, message) =
            AppError::Database(diesel::result::Error::NotFound).status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, GENERIC_ERROR_MESSAGE);

        let (status, message) = AppError::Email("relay refused".to_string()).status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_auth_and_permission_statuses() {
        assert_eq!(
            AppError::auth("Unauthorized").status_and_message().0,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::forbidden("Admin role required").status_and_message().0,
            StatusCode::FORBIDDEN
        );
    }
}
