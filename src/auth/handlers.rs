// HTTP handlers for authentication endpoints

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::auth::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::error::{ApiError, ValidationError};
use crate::AppState;

/// Register a new user
/// POST /user/register
#[utoipa::path(
    post,
    path = "/user/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Missing login or password", body = crate::error::MessageResponse),
        (status = 500, description = "Store error, e.g. duplicate login", body = crate::error::MessageResponse,
            example = json!({"message": "Erro ao registrar usuário - duplicate key value violates unique constraint"}))
    ),
    tag = "users"
)]
pub async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let Json(request) = payload?;
    request.validate().map_err(ValidationError::from)?;

    tracing::debug!("Registering user {}", request.login);
    let id = state.auth.register(&request).await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { id })))
}

/// Login a user
/// POST /user/login
#[utoipa::path(
    post,
    path = "/user/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 400, description = "Malformed body", body = crate::error::MessageResponse),
        (status = 401, description = "Unknown login or wrong password", body = crate::error::MessageResponse,
            example = json!({"message": "Login ou senha incorretos"})),
        (status = 500, description = "Store error", body = crate::error::MessageResponse)
    ),
    tag = "users"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = payload?;

    tracing::debug!("Login attempt for {}", request.login);
    let response = state.auth.login(&request).await?;

    Ok(Json(response))
}
