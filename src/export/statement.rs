//! Plain-text statement export
//!
//! Renders a plan as a statement: a plan header, then one section per
//! module with one line per transaction.

use std::io::Write;

use crate::error::{MoneyplanError, MoneyplanResult};
use crate::export::PlanSnapshot;

/// Export a plan as a plain-text statement
pub fn export_plan_statement<W: Write>(
    snapshot: &PlanSnapshot,
    mut writer: W,
) -> MoneyplanResult<()> {
    writeln!(writer, "Plan: {}", snapshot.plan_name)
        .map_err(|e| MoneyplanError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| MoneyplanError::Export(e.to_string()))?;

    for module in &snapshot.modules {
        writeln!(writer, "Module: {} ({})", module.name, module.kind)
            .map_err(|e| MoneyplanError::Export(e.to_string()))?;

        for txn in &module.transactions {
            writeln!(
                writer,
                "  {} - {} - {} - {}{} - {}",
                txn.date,
                txn.kind,
                txn.title,
                txn.currency_symbol,
                txn.amount,
                txn.description.as_deref().unwrap_or("")
            )
            .map_err(|e| MoneyplanError::Export(e.to_string()))?;
        }

        writeln!(writer).map_err(|e| MoneyplanError::Export(e.to_string()))?;
    }

    Ok(())
}
