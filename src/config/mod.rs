//! Configuration module for Moneyplan
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::MoneyplanPaths;
pub use settings::Settings;
