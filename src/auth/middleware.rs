// Authentication gate for protected routes

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::auth::{error::AuthError, token::TokenService};

/// Identity attached to a request by [`require_auth`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i32,
}

/// Check the `Authorization: Bearer <token>` header of a request
///
/// An absent or empty header is `MissingToken`; anything else that does not
/// yield a verified user id is `Denied`.
pub fn authorize(tokens: &TokenService, headers: &HeaderMap) -> Result<AuthenticatedUser, AuthError> {
    let value = match headers.get(header::AUTHORIZATION) {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthError::MissingToken),
    };

    let value = value.to_str().map_err(|_| AuthError::Denied)?;

    let (scheme, token) = value.trim().split_once(' ').ok_or(AuthError::Denied)?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::Denied);
    }

    let user_id = tokens.verify(token.trim()).map_err(|_| AuthError::Denied)?;
    Ok(AuthenticatedUser { user_id })
}

/// Middleware that rejects unauthenticated requests and records the caller
///
/// Install with `axum::middleware::from_fn_with_state(tokens, require_auth)`.
/// Never touches the stores.
pub async fn require_auth(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let user = authorize(&tokens, request.headers()).map_err(|e| {
        warn!(
            "Rejected request to protected endpoint {} {}: {}",
            request.method(),
            request.uri().path(),
            e
        );
        e
    })?;

    debug!(
        "Authenticated user_id={} for endpoint {}",
        user.user_id,
        request.uri().path()
    );
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Absent only when a handler is mounted without the gate.
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or(AuthError::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{HeaderValue, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Router,
    };
    use proptest::prelude::*;
    use tower::ServiceExt;

    const SECRET: &str = "test_secret_key_for_testing_purposes";

    fn test_token_service() -> TokenService {
        TokenService::new(SECRET)
    }

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn gated_router() -> Router {
        Router::new()
            .route(
                "/whoami",
                get(|user: AuthenticatedUser| async move { user.user_id.to_string() }),
            )
            .route_layer(from_fn_with_state(Arc::new(test_token_service()), require_auth))
    }

    async fn call(router: Router, auth: Option<&str>) -> (StatusCode, String) {
        let mut builder = axum::http::Request::builder().uri("/whoami");
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        let response = router.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn test_valid_token_is_accepted() {
        let service = test_token_service();
        let token = service.issue(42).unwrap();

        let user = authorize(&service, &headers_with_auth(&format!("Bearer {}", token))).unwrap();
        assert_eq!(user.user_id, 42);
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let service = test_token_service();
        let token = service.issue(5).unwrap();

        let user = authorize(&service, &headers_with_auth(&format!("bearer {}", token))).unwrap();
        assert_eq!(user.user_id, 5);
    }

    #[test]
    fn test_missing_authorization_header() {
        let service = test_token_service();
        assert_eq!(
            authorize(&service, &HeaderMap::new()).unwrap_err(),
            AuthError::MissingToken
        );
    }

    #[test]
    fn test_empty_authorization_header_counts_as_missing() {
        let service = test_token_service();
        assert_eq!(
            authorize(&service, &headers_with_auth("")).unwrap_err(),
            AuthError::MissingToken
        );
    }

    #[test]
    fn test_invalid_header_formats_are_denied() {
        let service = test_token_service();
        let token = service.issue(1).unwrap();

        let invalid = [
            token.clone(),
            format!("Basic {}", token),
            "Bearer".to_string(),
            "Bearer ".to_string(),
            "Bearer not.a.valid.jwt".to_string(),
        ];

        for value in invalid {
            assert_eq!(
                authorize(&service, &headers_with_auth(&value)).unwrap_err(),
                AuthError::Denied,
                "header {:?} should be denied",
                value
            );
        }
    }

    #[test]
    fn test_token_from_other_secret_is_denied() {
        let service = test_token_service();
        let foreign = TokenService::new("another-secret").issue(1).unwrap();

        assert_eq!(
            authorize(&service, &headers_with_auth(&format!("Bearer {}", foreign))).unwrap_err(),
            AuthError::Denied
        );
    }

    #[test]
    fn test_expired_token_is_denied() {
        let service = test_token_service();
        let stale = service
            .issue_at(1, chrono::Utc::now().timestamp() - 2 * crate::auth::token::TOKEN_TTL_SECONDS)
            .unwrap();

        assert_eq!(
            authorize(&service, &headers_with_auth(&format!("Bearer {}", stale))).unwrap_err(),
            AuthError::Denied
        );
    }

    #[tokio::test]
    async fn test_gate_attaches_identity() {
        let token = test_token_service().issue(77).unwrap();
        let (status, body) = call(gated_router(), Some(&format!("Bearer {}", token))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "77");
    }

    #[tokio::test]
    async fn test_gate_rejects_missing_header() {
        let (status, body) = call(gated_router(), None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["message"], "Token de acesso requerida");
    }

    #[tokio::test]
    async fn test_gate_rejects_bad_token() {
        let (status, body) = call(gated_router(), Some("Bearer garbage")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["message"], "Acesso negado");
    }

    #[tokio::test]
    async fn test_extractor_without_gate_is_rejected() {
        let router = Router::new().route(
            "/whoami",
            get(|user: AuthenticatedUser| async move { user.user_id.to_string() }),
        );
        let (status, _) = call(router, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    proptest! {
        #[test]
        fn prop_valid_tokens_accepted(user_id in 1i32..1_000_000) {
            let service = test_token_service();
            let token = service.issue(user_id)?;
            let user = authorize(&service, &headers_with_auth(&format!("Bearer {}", token)))?;
            prop_assert_eq!(user.user_id, user_id);
        }

        #[test]
        fn prop_malformed_tokens_denied(malformed in "[a-zA-Z0-9]{10,50}") {
            let service = test_token_service();
            let result = authorize(&service, &headers_with_auth(&format!("Bearer {}", malformed)));
            prop_assert_eq!(result, Err(AuthError::Denied));
        }
    }
}
