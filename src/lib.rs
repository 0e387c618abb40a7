//! Moneyplan - Percentage-based budget planning for the terminal
//!
//! This library provides the core functionality for the Moneyplan budgeting
//! application. A user partitions a total balance into named modules by
//! percentage, records expenses and income against those modules, and tracks
//! saving goals and emergency-fund thresholds, all from the command line.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (users, plans, modules, transactions)
//! - `storage`: JSON file storage layer, partitioned per user
//! - `services`: Business logic layer
//! - `reports`: Read-only trend and activity views
//! - `export`: CSV, JSON, and statement writers
//! - `display`: Terminal formatting
//! - `audit`: Audit logging system
//!
//! # Example
//!
//! ```rust,ignore
//! use moneyplan::config::{paths::MoneyplanPaths, settings::Settings};
//!
//! let paths = MoneyplanPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{MoneyplanError, MoneyplanResult};
