use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::dberrors::StoreError;

/// Main error type for the wallet service
#[derive(Debug)]
pub enum ServiceError {
    // Validation Errors
    /// Every failing field contributes one human-readable message.
    Validation(Vec<String>),

    // Credential Errors
    UserNotFound(String),
    InvalidCredentials,

    // Session Errors
    MissingToken,
    InvalidToken,
    OrphanedSession(String),

    // Storage Errors
    Storage(StoreError),

    // Internal Errors
    InternalServerError(String),
    ConfigurationError(String),
}

/// Error response structure sent to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Validation(messages) => {
                write!(f, "Validation failed: {}", messages.join("; "))
            }

            ServiceError::UserNotFound(email) => write!(f, "User not found: {}", email),
            ServiceError::InvalidCredentials => write!(f, "Email or password is incorrect"),

            ServiceError::MissingToken => write!(f, "Bearer token is required"),
            ServiceError::InvalidToken => write!(f, "Bearer token is invalid"),
            ServiceError::OrphanedSession(user_id) => {
                write!(f, "Session refers to a missing user: {}", user_id)
            }

            ServiceError::Storage(err) => write!(f, "{}", err),

            ServiceError::InternalServerError(msg) => write!(f, "Internal server error: {}", msg),
            ServiceError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 422 Unprocessable Entity
            ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,

            // 404 Not Found, sign-in reports bad passwords the same way as unknown emails
            ServiceError::UserNotFound(_) | ServiceError::InvalidCredentials => {
                StatusCode::NOT_FOUND
            }

            // 401 Unauthorized
            ServiceError::MissingToken
            | ServiceError::InvalidToken
            | ServiceError::OrphanedSession(_) => StatusCode::UNAUTHORIZED,

            // 500 Internal Server Error
            ServiceError::Storage(_)
            | ServiceError::InternalServerError(_)
            | ServiceError::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "VALIDATION_ERROR",

            ServiceError::UserNotFound(_) => "USER_NOT_FOUND",
            ServiceError::InvalidCredentials => "INVALID_CREDENTIALS",

            ServiceError::MissingToken => "MISSING_TOKEN",
            ServiceError::InvalidToken => "INVALID_TOKEN",
            ServiceError::OrphanedSession(_) => "INVALID_SESSION",

            ServiceError::Storage(_) | ServiceError::InternalServerError(_) => {
                "INTERNAL_SERVER_ERROR"
            }
            ServiceError::ConfigurationError(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Message safe to send to the client.
    ///
    /// Server-side failures never expose their cause, and an orphaned session
    /// looks exactly like an unknown token from the outside.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::Storage(_)
            | ServiceError::InternalServerError(_)
            | ServiceError::ConfigurationError(_) => "Internal server error".to_string(),
            ServiceError::OrphanedSession(_) => ServiceError::InvalidToken.to_string(),
            ServiceError::UserNotFound(_) => "User not found".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Implement IntoResponse for Axum integration
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "Request failed on the server");
        } else {
            tracing::debug!(error = %self, code = self.error_code(), "Request rejected");
        }

        if let ServiceError::Validation(messages) = self {
            return (status, Json(messages)).into_response();
        }

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.public_message(),
            },
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::Storage(err)
    }
}

/// Conversion from validation errors
///
/// Messages are sorted so the response body does not depend on map ordering.
impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                let field = field.to_string();
                errors.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("\"{}\" is invalid", field),
                })
            })
            .collect();
        messages.sort();

        ServiceError::Validation(messages)
    }
}

/// Type alias for Results using ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;
