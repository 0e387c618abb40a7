//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod export;
pub mod modules;
pub mod plan;
pub mod report;
pub mod transaction;

pub use account::{handle_signin, handle_signout, handle_signup, handle_whoami};
pub use export::{handle_export_command, ExportCommands};
pub use modules::{handle_module_command, ModuleCommands};
pub use plan::{handle_plan_command, handle_reset, PlanCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
