pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod notes;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use auth::{
    require_auth, AuthService, LoginRequest, LoginResponse, PasswordService, RegisterRequest,
    RegisterResponse, TokenService, UserRepository,
};
use config::Config;
use error::MessageResponse;
use notes::{CreateNoteRequest, Note, NoteRepository, UpdateNoteRequest};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        notes::handlers::list_notes_handler,
        notes::handlers::get_note_handler,
        notes::handlers::create_note_handler,
        notes::handlers::update_note_handler,
        notes::handlers::delete_note_handler,
        auth::handlers::register_handler,
        auth::handlers::login_handler,
    ),
    components(
        schemas(
            Note,
            CreateNoteRequest,
            UpdateNoteRequest,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            MessageResponse
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "notes", description = "Per-user notes, visible only to their owner"),
        (name = "users", description = "Registration and login")
    ),
    info(
        title = "Notes API",
        version = "0.1.0",
        description = "Authenticated note-taking API"
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by the note routes
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Application state shared across handlers
///
/// Built once at startup; the signing key and the pool are read-only from
/// here on.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub notes: NoteRepository,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(db: PgPool, jwt_secret: &str) -> Self {
        let tokens = Arc::new(TokenService::new(jwt_secret));
        let auth = AuthService::new(
            UserRepository::new(db.clone()),
            PasswordService::new(),
            Arc::clone(&tokens),
        );

        Self {
            auth: Arc::new(auth),
            notes: NoteRepository::new(db),
            tokens,
        }
    }

    pub fn from_config(db: PgPool, config: &Config) -> Self {
        Self::new(db, &config.jwt_secret)
    }
}

/// Response for any path that matches no route
async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 - Recurso não encontrado")
}

/// Creates and configures the application router
///
/// The note routes sit behind the auth gate; registration, login, the API
/// docs and the fallback do not.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let note_routes = Router::new()
        .route(
            "/notes",
            get(notes::list_notes_handler).post(notes::create_note_handler),
        )
        .route(
            "/notes/:id",
            get(notes::get_note_handler)
                .put(notes::update_note_handler)
                .delete(notes::delete_note_handler),
        )
        .route_layer(from_fn_with_state(Arc::clone(&state.tokens), require_auth));

    let user_routes = Router::new()
        .route("/user/register", post(auth::register_handler))
        .route("/user/login", post(auth::login_handler));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(note_routes)
        .merge(user_routes)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
