//! Password hashing using Argon2id
//!
//! Sign-up passwords are hashed with Argon2id, a memory-hard function
//! resistant to GPU/ASIC attacks, and stored as PHC strings. Each hash
//! carries its own random salt.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{MoneyplanError, MoneyplanResult};

/// Hash a password into a PHC string
pub fn hash_password(password: &str) -> MoneyplanResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| MoneyplanError::Authentication(format!("Password hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored PHC string
///
/// A mismatch returns `Ok(false)`; only a malformed stored hash or an
/// internal failure is an error.
pub fn verify_password(password: &str, stored_hash: &str) -> MoneyplanResult<bool> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| {
        MoneyplanError::Authentication(format!("Stored password hash is invalid: {}", e))
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(MoneyplanError::Authentication(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}
