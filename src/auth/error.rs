// Authentication and authorization error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::error::MessageResponse;

/// Authentication and authorization error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No Authorization header on a protected route
    #[error("Token de acesso requerida")]
    MissingToken,

    /// Authorization header present but not acceptable
    #[error("Acesso negado")]
    Denied,

    /// Bad signature, malformed structure or expired token
    #[error("Acesso negado")]
    InvalidToken,

    /// Unknown login or wrong password
    #[error("Login ou senha incorretos")]
    InvalidCredentials,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token generation error: {0}")]
    TokenGeneration(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken
            | AuthError::Denied
            | AuthError::InvalidToken
            | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::PasswordHash(_) | AuthError::TokenGeneration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to send to clients
    pub fn error_message(&self) -> String {
        match self {
            AuthError::PasswordHash(_) | AuthError::TokenGeneration(_) => {
                "Erro interno do servidor".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::MissingToken => warn!("Missing token in request"),
            AuthError::Denied | AuthError::InvalidToken => warn!("Rejected bearer token"),
            AuthError::InvalidCredentials => warn!("Failed login attempt"),
            AuthError::PasswordHash(msg) => error!("Password hashing error: {}", msg),
            AuthError::TokenGeneration(msg) => error!("Token generation error: {}", msg),
        }

        let body = Json(MessageResponse::new(self.error_message()));
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_messages() {
        assert_eq!(AuthError::MissingToken.error_message(), "Token de acesso requerida");
        assert_eq!(AuthError::Denied.error_message(), "Acesso negado");
        assert_eq!(AuthError::InvalidToken.error_message(), "Acesso negado");
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = AuthError::TokenGeneration("bad key".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.error_message().contains("bad key"));
    }

    #[test]
    fn test_credential_failure_is_unauthorized() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::InvalidCredentials.error_message(),
            "Login ou senha incorretos"
        );
    }
}
