//! CSV export
//!
//! Writes one row per transaction across every module of a plan, in the
//! column order plan, module, type, title, amount, date, description.

use std::io::Write;

use crate::error::{MoneyplanError, MoneyplanResult};
use crate::export::PlanSnapshot;

/// Export a plan's transactions to CSV
pub fn export_plan_csv<W: Write>(snapshot: &PlanSnapshot, writer: W) -> MoneyplanResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record([
        "plan",
        "module",
        "type",
        "title",
        "amount",
        "date",
        "description",
    ])
    .map_err(|e| MoneyplanError::Export(e.to_string()))?;

    for module in &snapshot.modules {
        for txn in &module.transactions {
            let kind = txn.kind.to_string();
            let amount = txn.amount.to_string();
            let date = txn.date.to_string();
            let description = txn.description.as_deref().unwrap_or("");

            wtr.write_record([
                snapshot.plan_name.as_str(),
                module.name.as_str(),
                kind.as_str(),
                txn.title.as_str(),
                amount.as_str(),
                date.as_str(),
                description,
            ])
            .map_err(|e| MoneyplanError::Export(e.to_string()))?;
        }
    }

    wtr.flush()
        .map_err(|e| MoneyplanError::Export(e.to_string()))?;

    Ok(())
}
