//! Custom error types for moneyplan
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use crate::models::Money;
use thiserror::Error;

/// The main error type for moneyplan operations
#[derive(Error, Debug)]
pub enum MoneyplanError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models and operation input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Sign-up/sign-in failures and missing sessions
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Expense amount exceeds the module balance
    #[error("Insufficient funds in module '{module}': need {needed}, have {available}")]
    InsufficientFunds {
        module: String,
        needed: Money,
        available: Money,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl MoneyplanError {
    /// Create a "not found" error for plans
    pub fn plan_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Plan",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for modules
    pub fn module_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Module",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an insufficient-funds rejection
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, Self::InsufficientFunds { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for MoneyplanError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MoneyplanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for moneyplan operations
pub type MoneyplanResult<T> = Result<T, MoneyplanError>;
