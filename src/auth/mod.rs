// Authentication module
// Provides argon2 password hashing, JWT bearer tokens, user registration/login
// and the gate that protects per-user routes

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{login_handler, register_handler};
pub use middleware::{authorize, require_auth, AuthenticatedUser};
pub use models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, User};
pub use password::PasswordService;
pub use repository::UserRepository;
pub use service::AuthService;
pub use token::{TokenService, TOKEN_TTL_SECONDS};
