//! User model
//!
//! Represents a local account owning a set of plans. Passwords are stored as
//! argon2id PHC hashes, never in plain text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::currency::Currency;

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Sign-in identifier, also the partition key for this user's plans
    pub email: String,

    /// Argon2id hash of the password in PHC string format
    pub password_hash: String,

    /// Currency selected at sign-up
    pub currency: Currency,

    /// When the user signed up
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with an already-hashed password
    pub fn new(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        currency: Currency,
    ) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
            currency,
            created_at: Utc::now(),
        }
    }

    /// The symbol of this user's currency
    pub fn currency_symbol(&self) -> &'static str {
        self.currency.symbol()
    }

    /// Validate the user record
    pub fn validate(&self) -> Result<(), UserValidationError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }

        // Minimal shape check; no full RFC validation
        let at = email.find('@');
        match at {
            Some(pos) if pos > 0 && pos < email.len() - 1 => {}
            _ => return Err(UserValidationError::InvalidEmail(email.to_string())),
        }

        if self.password_hash.is_empty() {
            return Err(UserValidationError::EmptyPasswordHash);
        }

        Ok(())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.email, self.currency)
    }
}

/// Validation errors for users
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyEmail,
    InvalidEmail(String),
    EmptyPasswordHash,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "Email cannot be empty"),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::EmptyPasswordHash => write!(f, "Password hash cannot be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = User::new("kay@example.com", "$argon2id$stub", Currency::Usd);
        assert_eq!(user.email, "kay@example.com");
        assert_eq!(user.currency, Currency::Usd);
        assert_eq!(user.currency_symbol(), "$");
        assert!(user.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_email() {
        let user = User::new("", "$argon2id$stub", Currency::Usd);
        assert_eq!(user.validate(), Err(UserValidationError::EmptyEmail));
    }

    #[test]
    fn test_validate_malformed_email() {
        for email in ["plainaddress", "@nodomain", "nolocal@"] {
            let user = User::new(email, "$argon2id$stub", Currency::Usd);
            assert!(
                matches!(user.validate(), Err(UserValidationError::InvalidEmail(_))),
                "expected rejection for {}",
                email
            );
        }
    }

    #[test]
    fn test_validate_empty_hash() {
        let user = User::new("kay@example.com", "", Currency::Usd);
        assert_eq!(user.validate(), Err(UserValidationError::EmptyPasswordHash));
    }

    #[test]
    fn test_serialization() {
        let user = User::new("kay@example.com", "$argon2id$stub", Currency::Inr);
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back.email, user.email);
        assert_eq!(back.currency, Currency::Inr);
    }
}
