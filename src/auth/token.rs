// JWT token generation and validation service

use crate::auth::error::AuthError;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lifetime of a bearer token, in seconds
pub const TOKEN_TTL_SECONDS: i64 = 3600;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub iat: i64,    // issued at timestamp
    pub exp: i64,    // expiration timestamp
}

/// Token service for JWT operations
///
/// Keys are derived from the secret once, at construction.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: i64,
}

impl TokenService {
    /// Create a new TokenService with secret key
    /// Tokens expire one hour after issuance
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `verify_at` against an explicit clock, without leeway.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: TOKEN_TTL_SECONDS,
        }
    }

    /// Issue a token for `user_id`, valid from now
    pub fn issue(&self, user_id: i32) -> Result<String, AuthError> {
        self.issue_at(user_id, Utc::now().timestamp())
    }

    /// Issue a token for `user_id` as if the current time were `now`
    pub fn issue_at(&self, user_id: i32, now: i64) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.ttl,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Validate a token and return the user id it was issued for
    pub fn verify(&self, token: &str) -> Result<i32, AuthError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Validate a token against an explicit clock
    ///
    /// A token is accepted up to and including its `exp` second.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<i32, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                AuthError::InvalidToken
            })?;

        if now > claims.exp {
            debug!("Token rejected: expired at {}, now {}", claims.exp, now);
            return Err(AuthError::InvalidToken);
        }

        claims.sub.parse::<i32>().map_err(|_| {
            debug!("Token rejected: non-numeric subject {:?}", claims.sub);
            AuthError::InvalidToken
        })
    }
}
