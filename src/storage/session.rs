//! Session store for JSON storage
//!
//! Tracks which user is currently signed in. The session survives across
//! invocations by persisting to session.json.

use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MoneyplanError;

use super::file_io::{read_json, write_json_atomic};

/// An active sign-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub email: String,
    pub signed_in_at: DateTime<Utc>,
}

/// Serializable session data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    session: Option<SessionRecord>,
}

/// Store for the current session
pub struct SessionStore {
    path: PathBuf,
    data: RwLock<Option<SessionRecord>>,
}

impl SessionStore {
    /// Create a new session store
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(None),
        }
    }

    /// Load the session from disk
    pub fn load(&self) -> Result<(), MoneyplanError> {
        let file_data: SessionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        *data = file_data.session;
        Ok(())
    }

    /// Save the session to disk
    pub fn save(&self) -> Result<(), MoneyplanError> {
        let data = self.data.read().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let file_data = SessionData {
            session: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get the current session, if any
    pub fn current(&self) -> Result<Option<SessionRecord>, MoneyplanError> {
        let data = self.data.read().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.clone())
    }

    /// Get the signed-in email, if any
    pub fn current_email(&self) -> Result<Option<String>, MoneyplanError> {
        Ok(self.current()?.map(|s| s.email))
    }

    /// Start a session for the given email
    pub fn sign_in(&self, email: &str) -> Result<(), MoneyplanError> {
        let mut data = self.data.write().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        *data = Some(SessionRecord {
            email: email.to_lowercase(),
            signed_in_at: Utc::now(),
        });
        Ok(())
    }

    /// End the current session, returning whether one existed
    pub fn sign_out(&self) -> Result<bool, MoneyplanError> {
        let mut data = self.data.write().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.take().is_some())
    }
}
