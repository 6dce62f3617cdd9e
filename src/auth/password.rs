use crate::error::AppError;
use bcrypt::{hash, verify};

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Checks a plaintext password against a stored hash.
///
/// A malformed stored hash counts as a failed verification rather than an
/// error: from the caller's point of view the password simply does not match.
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    verify(password, hashed_password).unwrap_or(false)
}
