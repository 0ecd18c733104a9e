use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::AppError;

/// Hashes a secret with Argon2 and a random salt, returning the PHC string.
pub fn hash_secret(secret: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Checks a candidate secret against a PHC string produced by `hash_secret`.
pub fn verify_secret(candidate: &str, secret_hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(secret_hash)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_matching_secret_only() {
        let hash = hash_secret("ca-instructor").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_secret("ca-instructor", &hash).unwrap());
        assert!(!verify_secret("CA-instructor", &hash).unwrap());
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(verify_secret("x", "not-a-phc-string").is_err());
    }
}
