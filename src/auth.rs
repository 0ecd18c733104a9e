// src/auth.rs

use async_trait::async_trait;

use crate::{
    error::AppError,
    utils::hash::{hash_secret, verify_secret},
};

/// Decides whether a presented instructor credential is acceptable.
///
/// Handlers only see this trait, so a real credential store can replace the
/// shared secret without touching the report code.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn verify(&self, secret: &str) -> Result<(), AppError>;
}

/// A single secret shared by all instructors.
///
/// Only the Argon2 hash is kept in memory. There is no lockout or backoff
/// after failed attempts; this is a convenience gate, not a security boundary.
pub struct SharedSecretAuthenticator {
    secret_hash: String,
}

impl SharedSecretAuthenticator {
    pub fn new(secret: &str) -> Result<Self, AppError> {
        if secret.is_empty() {
            return Err(AppError::InternalServerError(
                "instructor secret must not be empty".to_string(),
            ));
        }
        Ok(Self {
            secret_hash: hash_secret(secret)?,
        })
    }
}

#[async_trait]
impl Authenticator for SharedSecretAuthenticator {
    async fn verify(&self, secret: &str) -> Result<(), AppError> {
        let secret = secret.to_owned();
        let secret_hash = self.secret_hash.clone();

        // Argon2 is deliberately slow; keep it off the async workers.
        let valid = tokio::task::spawn_blocking(move || verify_secret(&secret, &secret_hash))
            .await
            .map_err(|e| AppError::InternalServerError(e.to_string()))??;

        if valid {
            Ok(())
        } else {
            tracing::warn!("Instructor login rejected");
            Err(AppError::AuthError("Invalid instructor secret".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn accepts_only_the_configured_secret() {
        let auth = SharedSecretAuthenticator::new("let-me-in").unwrap();
        assert!(auth.verify("let-me-in").await.is_ok());
        assert!(matches!(auth.verify("nope").await, Err(AppError::AuthError(_))));
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(SharedSecretAuthenticator::new("").is_err());
    }
}
