//! Storage layer for Moneyplan
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. Each document (users, plans, session) is read and written as
//! a whole file.

pub mod file_io;
pub mod plans;
pub mod session;
pub mod users;

pub use file_io::{read_json, write_json_atomic};
pub use plans::PlanRepository;
pub use session::{SessionRecord, SessionStore};
pub use users::UserRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::MoneyplanPaths;
use crate::error::MoneyplanError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: MoneyplanPaths,
    pub users: UserRepository,
    pub plans: PlanRepository,
    pub session: SessionStore,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: MoneyplanPaths) -> Result<Self, MoneyplanError> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            users: UserRepository::new(paths.users_file()),
            plans: PlanRepository::new(paths.plans_file()),
            session: SessionStore::new(paths.session_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &MoneyplanPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), MoneyplanError> {
        self.users.load()?;
        self.plans.load()?;
        self.session.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), MoneyplanError> {
        self.users.save()?;
        self.plans.save()?;
        self.session.save()?;
        Ok(())
    }

    /// Check if storage has been initialized (has a readable user document)
    pub fn is_initialized(&self) -> bool {
        file_io::json_file_valid(self.paths.users_file())
    }

    /// Record a create in the audit log
    ///
    /// Audit failures never fail the operation that triggered them.
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        let entry = AuditEntry::create(entity_type, entity_id, entity_name, entity);
        let _ = self.audit.log(&entry);
    }

    /// Record an update in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        detail: Option<String>,
    ) {
        let entry = AuditEntry::update(entity_type, entity_id, entity_name, before, after, detail);
        let _ = self.audit.log(&entry);
    }

    /// Record a delete in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        let entry = AuditEntry::delete(entity_type, entity_id, entity_name, entity);
        let _ = self.audit.log(&entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, User};
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyplanPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_load_and_save_all() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyplanPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        storage
            .users
            .upsert(User::new("ada@example.com", "hash", Currency::Usd))
            .unwrap();
        storage.session.sign_in("ada@example.com").unwrap();
        storage.save_all().unwrap();

        let paths2 = MoneyplanPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage2 = Storage::new(paths2).unwrap();
        storage2.load_all().unwrap();

        assert!(storage2.users.exists("ada@example.com").unwrap());
        assert_eq!(
            storage2.session.current_email().unwrap().as_deref(),
            Some("ada@example.com")
        );
        assert!(storage2.is_initialized());
    }

    #[test]
    fn test_audit_failure_does_not_fail_operation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyplanPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        // Make the audit log unwritable by replacing it with a directory
        std::fs::create_dir_all(storage.audit().path()).unwrap();

        let user = User::new("ada@example.com", "hash", Currency::Usd);
        storage.log_create(EntityType::User, user.email.clone(), None, &user);
    }
}
