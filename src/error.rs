// Error handling module for the Notes API
// Provides the handler-boundary error type and its HTTP response conversion

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::auth::AuthError;

/// Request body or path problems detected before any store access
/// Maps to HTTP 400 Bad Request
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Campo [note] é obrigatório.")]
    MissingNote,

    #[error("Campo [completed] é obrigatório.")]
    MissingCompleted,

    /// Field-level failures reported by `validator`
    #[error("Campos inválidos - {0}")]
    InvalidFields(String),

    /// Body is not JSON or does not match the expected schema
    #[error("Corpo da requisição inválido - {0}")]
    MalformedBody(String),

    #[error("Identificador inválido - {0}")]
    InvalidId(String),
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("Campo [{}] inválido.", field),
                })
            })
            .collect();
        // field_errors() is a HashMap; keep the message stable
        messages.sort();
        ValidationError::InvalidFields(messages.join(" "))
    }
}

/// Main error type for the API
/// All handlers return Result<T, ApiError>
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Row absent or owned by someone else; the two cases are not distinguished
    #[error("{resource} with id {id} not found")]
    NotFound { resource: &'static str, id: i32 },

    /// Any persistence failure. The store's message is surfaced to the client.
    #[error("{context} - {source}")]
    Store {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// A scoped write matched no row
    #[error("{0}")]
    NoRowsAffected(&'static str),
}

/// JSON body shared by every error and acknowledgement response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Atualizado com sucesso.")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ApiError {
    pub fn store(context: &'static str, source: sqlx::Error) -> Self {
        ApiError::Store { context, source }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(err) => err.status_code(),
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NoRowsAffected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Auth(err) => err.into_response(),
            ApiError::Validation(err) => {
                debug!("Validation error: {}", err);
                (StatusCode::BAD_REQUEST, Json(MessageResponse::new(err.to_string()))).into_response()
            }
            ApiError::NotFound { resource, id } => {
                debug!("Resource not found: {} with id {}", resource, id);
                StatusCode::NOT_FOUND.into_response()
            }
            ApiError::Store { context, source } => {
                error!("Database error ({}): {:?}", context, source);
                let message = format!("{} - {}", context, source);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(MessageResponse::new(message))).into_response()
            }
            ApiError::NoRowsAffected(message) => {
                error!("Scoped write matched no rows: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(MessageResponse::new(message))).into_response()
            }
        }
    }
}

/// Attaches a client-facing context to store failures
pub trait StoreContext<T> {
    fn store_context(self, context: &'static str) -> Result<T, ApiError>;
}

impl<T> StoreContext<T> for Result<T, sqlx::Error> {
    fn store_context(self, context: &'static str) -> Result<T, ApiError> {
        self.map_err(|source| ApiError::store(context, source))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(ValidationError::MalformedBody(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(ValidationError::InvalidId(rejection.body_text()))
    }
}
