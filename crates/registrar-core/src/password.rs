//! Password hashing and verification.
//!
//! bcrypt is CPU-bound, so the async variants move the work onto tokio's
//! blocking pool instead of stalling the executor thread.

use bcrypt::{BcryptError, hash, verify};

use crate::errors::AppError;

pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost).map_err(|e| AppError::hashing(format!("failed to hash password: {}", e)))
}

/// A stored value that is not a well-formed bcrypt hash never matches.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    match verify(password, hash) {
        Ok(matched) => Ok(matched),
        Err(
            BcryptError::InvalidHash(_)
            | BcryptError::InvalidPrefix(_)
            | BcryptError::InvalidCost(_)
            | BcryptError::InvalidBase64(_),
        ) => Ok(false),
        Err(e) => Err(AppError::hashing(format!("failed to verify password: {}", e))),
    }
}

pub async fn hash_password_async(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| AppError::hashing(format!("hashing task aborted: {}", e)))?
}

pub async fn verify_password_async(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::hashing(format!("verification task aborted: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    const COST: u32 = 4;

    #[test]
    fn rejects_cost_outside_bcrypt_range() {
        let result = hash_password("secret", 3);

        assert!(matches!(result, Err(AppError::HashingFailure(_))));
    }

    #[test]
    fn malformed_hash_is_a_mismatch() {
        for hash in ["not-a-bcrypt-hash", "", "$3x$04$abc", "$2b$xx$abc"] {
            assert!(!verify_password("secret", hash).unwrap());
        }
    }

    #[tokio::test]
    async fn async_round_trip_matches() {
        let hashed = hash_password_async("secret".to_string(), COST).await.unwrap();

        assert!(verify_password_async("secret".to_string(), hashed.clone()).await.unwrap());
        assert!(!verify_password_async("Secret".to_string(), hashed).await.unwrap());
    }
}
