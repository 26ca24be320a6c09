// Authentication data models and DTOs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// User database model (`usuario` table)
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub name: Option<String>,
    pub login: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub email: Option<String>,
    /// Stored and echoed at login; never consulted for authorization
    pub roles: Option<String>,
}

/// Registration request DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Bob")]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Campo [login] é obrigatório."))]
    #[schema(example = "bob")]
    pub login: String,
    #[validate(length(min = 1, message = "Campo [password] é obrigatório."))]
    #[schema(example = "pw1")]
    pub password: String,
    #[schema(example = "bob@example.com")]
    pub email: Option<String>,
}

/// Registration response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    #[schema(example = 1)]
    pub id: i32,
}

/// Login request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "bob")]
    pub login: String,
    #[schema(example = "pw1")]
    pub password: String,
}

/// Login response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub id: i32,
    pub login: String,
    pub roles: Option<String>,
    pub token: String,
}
