//! Session service
//!
//! Handles sign-up, sign-in, and sign-out. Signing up starts a session
//! for the new account straight away. Sign-in failures never reveal
//! whether the email or the password was wrong.

use crate::audit::EntityType;
use crate::crypto::{hash_password, verify_password};
use crate::error::{MoneyplanError, MoneyplanResult};
use crate::models::{Currency, User};
use crate::storage::Storage;

/// Service for account sessions
pub struct SessionService<'a> {
    storage: &'a Storage,
}

impl<'a> SessionService<'a> {
    /// Create a new session service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new account and sign it in
    pub fn sign_up(&self, email: &str, password: &str, currency: Currency) -> MoneyplanResult<User> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() {
            return Err(MoneyplanError::Validation(
                "Email and password are required".into(),
            ));
        }

        if self.storage.users.exists(&email)? {
            return Err(MoneyplanError::Authentication(
                "User already exists. Please sign in.".into(),
            ));
        }

        let password_hash = hash_password(password)?;
        let user = User::new(email.clone(), password_hash, currency);
        user.validate()
            .map_err(|e| MoneyplanError::Validation(e.to_string()))?;

        self.storage.users.upsert(user.clone())?;
        self.storage.users.save()?;

        self.storage.session.sign_in(&email)?;
        self.storage.session.save()?;

        // Never write the password hash to the audit log
        self.storage.log_create(
            EntityType::User,
            email,
            None,
            &serde_json::json!({ "email": user.email, "currency": user.currency.code() }),
        );

        Ok(user)
    }

    /// Sign in an existing account
    pub fn sign_in(&self, email: &str, password: &str) -> MoneyplanResult<User> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() {
            return Err(MoneyplanError::Validation(
                "Email and password are required".into(),
            ));
        }

        let user = match self.storage.users.get(&email)? {
            Some(user) => user,
            None => {
                return Err(MoneyplanError::Authentication(
                    "Invalid email or password".into(),
                ))
            }
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(MoneyplanError::Authentication(
                "Invalid email or password".into(),
            ));
        }

        self.storage.session.sign_in(&email)?;
        self.storage.session.save()?;

        Ok(user)
    }

    /// End the current session, returning the email that was signed out
    pub fn sign_out(&self) -> MoneyplanResult<Option<String>> {
        let email = self.storage.session.current_email()?;
        if self.storage.session.sign_out()? {
            self.storage.session.save()?;
        }
        Ok(email)
    }

    /// Get the signed-in user, if any
    pub fn current(&self) -> MoneyplanResult<Option<User>> {
        match self.storage.session.current_email()? {
            Some(email) => self.storage.users.get(&email),
            None => Ok(None),
        }
    }

    /// Get the signed-in user, or fail if nobody is signed in
    pub fn require_current(&self) -> MoneyplanResult<User> {
        self.current()?.ok_or_else(|| {
            MoneyplanError::Authentication("Not signed in. Run 'moneyplan signin' first.".into())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MoneyplanPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyplanPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_sign_up_starts_session() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SessionService::new(&storage);

        let user = service
            .sign_up("Ada@Example.com", "hunter22", Currency::Usd)
            .unwrap();
        assert_eq!(user.email, "ada@example.com");

        let current = service.current().unwrap().unwrap();
        assert_eq!(current.email, "ada@example.com");
    }

    #[test]
    fn test_sign_up_rejects_duplicate() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SessionService::new(&storage);

        service
            .sign_up("ada@example.com", "hunter22", Currency::Usd)
            .unwrap();

        let err = service
            .sign_up("ADA@example.com", "other", Currency::Inr)
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_sign_up_rejects_empty_fields() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SessionService::new(&storage);

        assert!(service.sign_up("", "hunter22", Currency::Usd).is_err());
        assert!(service
            .sign_up("ada@example.com", "", Currency::Usd)
            .is_err());
    }

    #[test]
    fn test_sign_in_roundtrip() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SessionService::new(&storage);

        service
            .sign_up("ada@example.com", "hunter22", Currency::Usd)
            .unwrap();
        service.sign_out().unwrap();
        assert!(service.current().unwrap().is_none());

        let user = service.sign_in("ada@example.com", "hunter22").unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert!(service.current().unwrap().is_some());
    }

    #[test]
    fn test_sign_in_rejects_bad_credentials() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SessionService::new(&storage);

        service
            .sign_up("ada@example.com", "hunter22", Currency::Usd)
            .unwrap();
        service.sign_out().unwrap();

        let wrong_password = service
            .sign_in("ada@example.com", "wrong")
            .unwrap_err()
            .to_string();
        let unknown_user = service
            .sign_in("grace@example.com", "hunter22")
            .unwrap_err()
            .to_string();

        // Same message either way
        assert!(wrong_password.contains("Invalid email or password"));
        assert_eq!(wrong_password, unknown_user);
    }

    #[test]
    fn test_sign_out_reports_email_once() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SessionService::new(&storage);

        service
            .sign_up("ada@example.com", "hunter22", Currency::Usd)
            .unwrap();

        assert_eq!(
            service.sign_out().unwrap().as_deref(),
            Some("ada@example.com")
        );
        assert_eq!(service.sign_out().unwrap(), None);
    }

    #[test]
    fn test_require_current() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SessionService::new(&storage);

        let err = service.require_current().unwrap_err();
        assert!(err.to_string().contains("Not signed in"));

        service
            .sign_up("ada@example.com", "hunter22", Currency::Usd)
            .unwrap();
        assert!(service.require_current().is_ok());
    }
}
