//! JSON export
//!
//! Wraps a plan snapshot in a versioned document with an export
//! timestamp and metadata.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{MoneyplanError, MoneyplanResult};
use crate::export::PlanSnapshot;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Versioned export document for one plan
#[derive(Debug, Clone, Serialize)]
pub struct PlanExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// The exported plan
    pub plan: PlanSnapshot,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub module_count: usize,
    pub transaction_count: usize,

    /// Date range of transactions (earliest)
    pub earliest_transaction: Option<String>,

    /// Date range of transactions (latest)
    pub latest_transaction: Option<String>,
}

impl PlanExport {
    /// Wrap a snapshot in a versioned export document
    pub fn new(plan: PlanSnapshot) -> Self {
        let dates: Vec<_> = plan
            .modules
            .iter()
            .flat_map(|m| m.transactions.iter().map(|t| t.date))
            .collect();

        let metadata = ExportMetadata {
            module_count: plan.modules.len(),
            transaction_count: plan.transaction_count(),
            earliest_transaction: dates.iter().min().map(|d| d.to_string()),
            latest_transaction: dates.iter().max().map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            plan,
            metadata,
        }
    }
}

/// Export a plan to JSON
pub fn export_plan_json<W: Write>(
    snapshot: &PlanSnapshot,
    writer: W,
    pretty: bool,
) -> MoneyplanResult<()> {
    let export = PlanExport::new(snapshot.clone());

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| MoneyplanError::Export(e.to_string()))?;

    Ok(())
}
