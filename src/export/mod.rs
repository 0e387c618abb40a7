//! Export module for Moneyplan
//!
//! Provides per-plan data export in multiple formats:
//! - CSV: one row per transaction (spreadsheet-compatible)
//! - JSON: versioned machine-readable snapshot
//! - Statement: plain-text listing grouped by module
//!
//! Every writer consumes a read-only [`PlanSnapshot`] and produces a
//! byte stream.

pub mod csv;
pub mod json;
pub mod snapshot;
pub mod statement;

pub use csv::export_plan_csv;
pub use json::{export_plan_json, PlanExport, EXPORT_SCHEMA_VERSION};
pub use snapshot::{ModuleSnapshot, PlanSnapshot, TransactionSnapshot};
pub use statement::export_plan_statement;
