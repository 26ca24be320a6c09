// Database repository for user credentials

use crate::auth::models::User;
use sqlx::PgPool;

/// User repository for database operations on `usuario`
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user and return its id
    ///
    /// A duplicate login surfaces as the raw unique-violation error.
    pub async fn create_user(
        &self,
        name: Option<&str>,
        login: &str,
        password_hash: &str,
        email: Option<&str>,
    ) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            "INSERT INTO usuario (name, login, password, email) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(name)
        .bind(login)
        .bind(password_hash)
        .bind(email)
        .fetch_one(&self.pool)
        .await
    }

    /// Find a user by exact login
    pub async fn find_by_login(&self, login: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, login, password, email, roles FROM usuario WHERE login = $1",
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await
    }
}
