//! Argon2 password hashing. Stored values are PHC strings (`$argon2id$...`).
//!
//! Hashing is CPU bound, so both operations run on the blocking pool.

use crate::error::AppError;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tokio::task;

pub async fn hash_password(plain: &str) -> Result<String, AppError> {
    let plain = plain.to_owned();
    task::spawn_blocking(move || hash_blocking(&plain))
        .await
        .map_err(|e| AppError::Password(e.to_string()))?
}

/// `Ok(false)` on mismatch. A stored value that is not a PHC string is an error, not a mismatch.
pub async fn verify_password(plain: &str, stored: &str) -> Result<bool, AppError> {
    let (plain, stored) = (plain.to_owned(), stored.to_owned());
    task::spawn_blocking(move || verify_blocking(&plain, &stored))
        .await
        .map_err(|e| AppError::Password(e.to_string()))?
}

fn hash_blocking(plain: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Password(e.to_string()))
}

fn verify_blocking(plain: &str, stored: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored).map_err(|e| AppError::Password(e.to_string()))?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Password(e.to_string())),
    }
}
