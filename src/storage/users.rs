//! User repository for JSON storage
//!
//! Manages loading and saving user accounts to users.json. Users are keyed
//! by email address, normalized to lowercase.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::MoneyplanError;
use crate::models::User;

use super::file_io::{read_json, write_json_atomic};

/// Serializable user data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct UserData {
    users: Vec<User>,
}

/// Repository for user persistence
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<HashMap<String, User>>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load users from disk
    pub fn load(&self) -> Result<(), MoneyplanError> {
        let file_data: UserData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for user in file_data.users {
            data.insert(user.email.to_lowercase(), user);
        }

        Ok(())
    }

    /// Save users to disk
    pub fn save(&self) -> Result<(), MoneyplanError> {
        let data = self.data.read().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));

        let file_data = UserData { users };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a user by email (case-insensitive)
    pub fn get(&self, email: &str) -> Result<Option<User>, MoneyplanError> {
        let data = self.data.read().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&email.to_lowercase()).cloned())
    }

    /// Get all users, sorted by email
    pub fn get_all(&self) -> Result<Vec<User>, MoneyplanError> {
        let data = self.data.read().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    /// Insert or update a user
    pub fn upsert(&self, user: User) -> Result<(), MoneyplanError> {
        let mut data = self.data.write().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(user.email.to_lowercase(), user);
        Ok(())
    }

    /// Delete a user
    pub fn delete(&self, email: &str) -> Result<bool, MoneyplanError> {
        let mut data = self.data.write().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(&email.to_lowercase()).is_some())
    }

    /// Check if a user exists
    pub fn exists(&self, email: &str) -> Result<bool, MoneyplanError> {
        let data = self.data.read().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.contains_key(&email.to_lowercase()))
    }

    /// Count users
    pub fn count(&self) -> Result<usize, MoneyplanError> {
        let data = self.data.read().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}
