// Authentication service - business logic layer

use std::sync::Arc;

use crate::auth::{
    error::AuthError,
    models::{LoginRequest, LoginResponse, RegisterRequest},
    password::PasswordService,
    repository::UserRepository,
    token::TokenService,
};
use crate::error::{ApiError, StoreContext};

/// Authentication service coordinating registration and login
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    password_service: PasswordService,
    token_service: Arc<TokenService>,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(
        user_repo: UserRepository,
        password_service: PasswordService,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            user_repo,
            password_service,
            token_service,
        }
    }

    /// Register a new user, returning the store-assigned id
    pub async fn register(&self, request: &RegisterRequest) -> Result<i32, ApiError> {
        let password_hash = self
            .password_service
            .hash_password_async(request.password.clone())
            .await?;

        let id = self
            .user_repo
            .create_user(
                request.name.as_deref(),
                &request.login,
                &password_hash,
                request.email.as_deref(),
            )
            .await
            .store_context("Erro ao registrar usuário")?;

        tracing::info!("Registered user {} with id {}", request.login, id);
        Ok(id)
    }

    /// Check credentials and mint a bearer token
    ///
    /// Unknown logins and wrong passwords are reported identically.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let user = self
            .user_repo
            .find_by_login(&request.login)
            .await
            .store_context("Erro ao verificar login")?
            .ok_or_else(|| {
                tracing::debug!("Login attempt for unknown login {}", request.login);
                AuthError::InvalidCredentials
            })?;

        let verified = self
            .password_service
            .verify_password_async(request.password.clone(), user.password_hash.clone())
            .await?;
        if !verified {
            tracing::debug!("Password mismatch for user {}", user.id);
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.token_service.issue(user.id)?;

        tracing::info!("User {} logged in", user.id);
        Ok(LoginResponse {
            id: user.id,
            login: user.login,
            roles: user.roles,
            token,
        })
    }
}
