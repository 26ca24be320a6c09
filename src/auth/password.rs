// Password hashing and verification service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::debug;

use crate::auth::error::AuthError;

/// Password service for hashing and verification
#[derive(Clone, Default)]
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a password using Argon2id
    ///
    /// Each call draws a fresh salt, so hashing the same plaintext twice
    /// yields two different PHC strings that both verify.
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::PasswordHash(e.to_string()))
    }

    /// Verify a password against a stored hash
    ///
    /// A stored hash that does not parse counts as a mismatch.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!("Stored password hash is malformed: {}", e);
                return false;
            }
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// [`hash_password`](Self::hash_password) on the blocking thread pool
    pub async fn hash_password_async(&self, password: String) -> Result<String, AuthError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.hash_password(&password))
            .await
            .map_err(|e| AuthError::PasswordHash(format!("hashing task failed: {e}")))?
    }

    /// [`verify_password`](Self::verify_password) on the blocking thread pool
    pub async fn verify_password_async(&self, password: String, hash: String) -> Result<bool, AuthError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.verify_password(&password, &hash))
            .await
            .map_err(|e| AuthError::PasswordHash(format!("verification task failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_hash_and_verify() {
        let service = PasswordService::new();
        let hash = service.hash_password("pw1").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(service.verify_password("pw1", &hash));
        assert!(!service.verify_password("pw2", &hash));
    }

    #[test]
    fn test_different_salts() {
        let service = PasswordService::new();
        let hash1 = service.hash_password("same-password").unwrap();
        let hash2 = service.hash_password("same-password").unwrap();

        assert_ne!(hash1, hash2);
        assert!(service.verify_password("same-password", &hash1));
        assert!(service.verify_password("same-password", &hash2));
    }

    #[test]
    fn test_malformed_hash_is_a_mismatch() {
        let service = PasswordService::new();
        assert!(!service.verify_password("password", "not-a-valid-hash"));
        assert!(!service.verify_password("password", ""));
        assert!(!service.verify_password("", "$argon2id$v=19$garbage"));
    }

    #[test]
    fn test_empty_password_is_hashable() {
        let service = PasswordService::new();
        let hash = service.hash_password("").unwrap();
        assert!(service.verify_password("", &hash));
        assert!(!service.verify_password(" ", &hash));
    }

    #[tokio::test]
    async fn test_async_hash_and_verify() {
        let service = PasswordService::new();
        let hash = service.hash_password_async("pw1".to_string()).await.unwrap();

        assert!(service
            .verify_password_async("pw1".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!service
            .verify_password_async("pw2".to_string(), hash)
            .await
            .unwrap());
        assert!(!service
            .verify_password_async("pw1".to_string(), "not-a-valid-hash".to_string())
            .await
            .unwrap());
    }

    // Single-threaded runtime: the timer only fires before hashing finishes if
    // argon2 runs off the executor thread.
    #[tokio::test(flavor = "current_thread")]
    async fn test_hashing_does_not_starve_executor() {
        let service = PasswordService::new();
        let timer = tokio::spawn(async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            Instant::now()
        });

        let hash = service.hash_password_async("pw1".to_string()).await.unwrap();
        assert!(service
            .verify_password_async("pw1".to_string(), hash)
            .await
            .unwrap());
        let hashing_done = Instant::now();

        let timer_fired = timer.await.unwrap();
        assert!(
            timer_fired < hashing_done,
            "timer fired {:?} after hashing finished",
            timer_fired - hashing_done
        );
    }

    proptest! {
        // Argon2 is deliberately expensive; a handful of cases is enough.
        #![proptest_config(ProptestConfig::with_cases(4))]

        #[test]
        fn prop_hash_verifies_only_its_plaintext(
            plaintext in "\\PC{0,24}",
            other in "\\PC{0,24}",
        ) {
            prop_assume!(plaintext != other);
            let service = PasswordService::new();
            let hash = service.hash_password(&plaintext).unwrap();

            prop_assert!(service.verify_password(&plaintext, &hash));
            prop_assert!(!service.verify_password(&other, &hash));
        }
    }
}
