use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error("validation failed")]
    Validation(validator::ValidationErrors),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("account pending approval")]
    PendingApproval,

    #[error("account deactivated")]
    AccountDeactivated,

    #[error("email already registered")]
    DuplicateEmail,

    #[error("mobile number already registered")]
    DuplicateMobile,

    #[error("invalid token")]
    InvalidToken,

    #[error("identity store timed out")]
    StoreTimeout,

    #[error("database error: {0}")]
    Database(String),

    #[error("internal server error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AuthError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AuthError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation failed".to_string()),
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            ),
            // Intentional disclosure exceptions: a matched-but-pending doctor
            // and a matched-but-deactivated admin get distinct messages.
            AuthError::PendingApproval => (
                StatusCode::UNAUTHORIZED,
                "Your account is pending approval".to_string(),
            ),
            AuthError::AccountDeactivated => (
                StatusCode::UNAUTHORIZED,
                "Your account has been deactivated".to_string(),
            ),
            AuthError::DuplicateEmail => (
                StatusCode::BAD_REQUEST,
                "Email is already registered".to_string(),
            ),
            AuthError::DuplicateMobile => (
                StatusCode::BAD_REQUEST,
                "Mobile number is already registered".to_string(),
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token".to_string(),
            ),
            // Store and crypto failures are logged internally and collapsed
            // into one client-visible message.
            AuthError::StoreTimeout | AuthError::Database(_) | AuthError::Internal(_) => {
                tracing::error!(error = %self, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = match &self {
            AuthError::Validation(errors) => Json(json!({
                "success": false,
                "message": message,
                "errors": errors,
            })),
            _ => Json(json!({
                "success": false,
                "message": message,
            })),
        };

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {}", err);
        AuthError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AuthError {
    fn from(err: validator::ValidationErrors) -> Self {
        AuthError::Validation(err)
    }
}

impl From<session_core::SessionError> for AuthError {
    fn from(err: session_core::SessionError) -> Self {
        match err {
            session_core::SessionError::Invalid => AuthError::InvalidToken,
            session_core::SessionError::Signing => {
                AuthError::Internal("session token signing failed".to_string())
            }
        }
    }
}
