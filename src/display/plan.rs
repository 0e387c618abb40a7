//! Plan display formatting
//!
//! Formats plans for terminal output in table and detail views.

use crate::models::{Money, Plan};
use crate::services::PlanStatus;

/// Format a list of plans as a table
pub fn format_plan_list(plans: &[Plan], symbol: &str) -> String {
    if plans.is_empty() {
        return "No plans found. Create one with 'moneyplan plan create'.\n".to_string();
    }

    let name_width = plans
        .iter()
        .map(|p| p.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>14}  {:>7}  {:>12}  {}\n",
        "Name",
        "Total",
        "Modules",
        "Transactions",
        "Created",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->14}  {:->7}  {:->12}  {:-<10}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for plan in plans {
        output.push_str(&format!(
            "{:<name_width$}  {:>14}  {:>7}  {:>12}  {}\n",
            plan.name,
            plan.total_balance.format_with_symbol(symbol),
            plan.modules.len(),
            plan.transaction_count(),
            plan.created_at.format("%Y-%m-%d"),
            name_width = name_width,
        ));
    }

    let grand_total: Money = plans.iter().map(|p| p.total_balance).sum();

    output.push_str(&format!(
        "{:-<name_width$}  {:->14}  {:->7}  {:->12}  {:-<10}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:<name_width$}  {:>14}\n",
        "TOTAL",
        grand_total.format_with_symbol(symbol),
        name_width = name_width,
    ));

    output
}

/// Format a single plan's status: balances, goals, alerts, drift
pub fn format_plan_details(status: &PlanStatus, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Plan: {}\n", status.name));
    output.push_str(&format!("  ID:      {}\n", status.plan_id));
    output.push_str(&format!(
        "  Total:   {}\n",
        status.total_balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!("  Modules: {}\n", status.modules.len()));
    output.push('\n');

    let name_width = status
        .modules
        .iter()
        .map(|m| m.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    output.push_str(&format!(
        "{:<name_width$}  {:<9}  {:>8}  {:>14}  {:>7}\n",
        "Name",
        "Type",
        "Percent",
        "Balance",
        "Share",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<9}  {:->8}  {:->14}  {:->7}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for module in &status.modules {
        let share = module
            .share_of_plan
            .map(|s| format!("{:.1}%", s))
            .unwrap_or_else(|| "-".to_string());

        output.push_str(&format!(
            "{:<name_width$}  {:<9}  {:>8}  {:>14}  {:>7}\n",
            module.name,
            module.kind.to_string(),
            module.percentage.to_string(),
            module.balance.format_with_symbol(symbol),
            share,
            name_width = name_width,
        ));
    }

    let mut notes = Vec::new();
    for module in &status.modules {
        if let Some(saving) = &module.saving {
            let progress = saving
                .percent_complete
                .map(|p| format!("{:.1}% of target reached", p))
                .unwrap_or_else(|| "no positive target".to_string());
            notes.push(format!(
                "{}: saving goal {} (target {}), {}",
                module.name,
                saving.goal,
                saving.target.format_with_symbol(symbol),
                progress
            ));
        }
        if let Some(emergency) = &module.emergency {
            if emergency.below_threshold {
                notes.push(format!(
                    "{}: LOW FUNDS - balance below threshold {} (short {})",
                    module.name,
                    emergency.threshold.format_with_symbol(symbol),
                    emergency.shortfall.format_with_symbol(symbol)
                ));
            } else {
                notes.push(format!(
                    "{}: emergency threshold {} met",
                    module.name,
                    emergency.threshold.format_with_symbol(symbol)
                ));
            }
        }
    }

    if !notes.is_empty() {
        output.push('\n');
        output.push_str("Goals and alerts:\n");
        for note in notes {
            output.push_str(&format!("  {}\n", note));
        }
    }

    if status.allocation_drift {
        output.push('\n');
        output.push_str(&format!(
            "Warning: module percentages sum to {}% (allocation drift)\n",
            status.percentage_total.normalize()
        ));
    }

    output
}
