//! Module CLI commands
//!
//! Implements CLI commands for editing modules within a plan and for
//! managing saving goals and emergency thresholds.

use clap::Subcommand;

use crate::error::{MoneyplanError, MoneyplanResult};
use crate::models::{Money, Percent, SavingGoal};
use crate::services::{GoalMonitor, LedgerService, PlanService, SessionService};
use crate::storage::Storage;

/// Module subcommands
#[derive(Subcommand)]
pub enum ModuleCommands {
    /// Edit a module's name, percentage, or color
    Edit {
        /// Plan name or ID
        plan: String,
        /// Module name or ID
        module: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New percentage (e.g., "50" or "50%")
        #[arg(short, long)]
        percentage: Option<String>,
        /// New color (#rrggbb)
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Delete a module; its balance leaves the plan total
    Delete {
        /// Plan name or ID
        plan: String,
        /// Module name or ID
        module: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Set a saving goal on a saving module
    SetGoal {
        /// Plan name or ID
        plan: String,
        /// Module name or ID
        module: String,
        /// Goal as a percentage of the plan total
        #[arg(long, conflicts_with = "amount")]
        percent: Option<String>,
        /// Goal as an absolute amount
        #[arg(long)]
        amount: Option<String>,
    },
    /// Clear a module's saving goal
    ClearGoal {
        /// Plan name or ID
        plan: String,
        /// Module name or ID
        module: String,
    },
    /// Set an emergency threshold on an emergency module
    SetThreshold {
        /// Plan name or ID
        plan: String,
        /// Module name or ID
        module: String,
        /// Minimum balance before the module is flagged
        amount: String,
    },
    /// Clear a module's emergency threshold
    ClearThreshold {
        /// Plan name or ID
        plan: String,
        /// Module name or ID
        module: String,
    },
}

/// Handle a module command
pub fn handle_module_command(storage: &Storage, cmd: ModuleCommands) -> MoneyplanResult<()> {
    let user = SessionService::new(storage).require_current()?;
    let owner = user.email.as_str();
    let symbol = user.currency_symbol();

    match cmd {
        ModuleCommands::Edit {
            plan,
            module,
            name,
            percentage,
            color,
        } => {
            let new_percentage = percentage
                .as_deref()
                .map(|p| {
                    Percent::parse(p).map_err(|e| {
                        MoneyplanError::Validation(format!("Invalid percentage '{}': {}", p, e))
                    })
                })
                .transpose()?;

            let ledger = LedgerService::new(storage);
            let updated = ledger.edit_module(
                owner,
                &plan,
                &module,
                name.as_deref(),
                new_percentage,
                color.as_deref(),
            )?;

            let identifier = name.as_deref().unwrap_or(&module);
            println!("Updated module in plan '{}'", updated.name);
            if let Some(edited) = updated.find_module(identifier) {
                println!(
                    "  {} ({}) {} -> {}",
                    edited.name,
                    edited.kind,
                    edited.percentage,
                    edited.balance.format_with_symbol(symbol)
                );
            }
            println!(
                "  Plan total: {}",
                updated.total_balance.format_with_symbol(symbol)
            );
            if updated.has_allocation_drift() {
                println!(
                    "  Note: module percentages now sum to {}%",
                    updated.percentage_total().normalize()
                );
            }
        }

        ModuleCommands::Delete { plan, module, yes } => {
            let found = PlanService::new(storage).require(owner, &plan)?;
            let target = found
                .find_module(&module)
                .ok_or_else(|| MoneyplanError::module_not_found(&module))?;

            if !yes {
                println!("About to delete module:");
                println!(
                    "  {} with balance {} ({} transactions)",
                    target.name,
                    target.balance.format_with_symbol(symbol),
                    target.transactions.len()
                );
                println!("The plan total drops by the module balance.");
                println!();
                println!("Use --yes to confirm deletion");
                return Ok(());
            }

            let ledger = LedgerService::new(storage);
            let updated = ledger.delete_module(owner, &plan, &module)?;
            println!("Deleted module '{}' from plan '{}'", module, updated.name);
            println!(
                "  Plan total: {}",
                updated.total_balance.format_with_symbol(symbol)
            );
        }

        ModuleCommands::SetGoal {
            plan,
            module,
            percent,
            amount,
        } => {
            let goal = match (percent, amount) {
                (Some(p), None) => SavingGoal::Percent(Percent::parse(&p).map_err(|e| {
                    MoneyplanError::Validation(format!("Invalid percentage '{}': {}", p, e))
                })?),
                (None, Some(a)) => SavingGoal::Amount(Money::parse(&a).map_err(|e| {
                    MoneyplanError::Validation(format!("Invalid amount '{}': {}", a, e))
                })?),
                _ => {
                    return Err(MoneyplanError::Validation(
                        "Give the goal as either --percent or --amount".into(),
                    ))
                }
            };

            let monitor = GoalMonitor::new(storage);
            let updated = monitor.set_saving_goal(owner, &plan, &module, goal)?;

            println!("Set saving goal on '{}'", module);
            if let Some(target) = updated.find_module(&module) {
                if let Some(status) = monitor
                    .plan_status(&updated)
                    .modules
                    .iter()
                    .find(|m| m.module_id == target.id)
                {
                    if let Some(saving) = &status.saving {
                        println!(
                            "  Target: {}",
                            saving.target.format_with_symbol(symbol)
                        );
                        if let Some(pct) = saving.percent_complete {
                            println!("  Progress: {:.1}% of target", pct);
                        }
                    }
                }
            }
        }

        ModuleCommands::ClearGoal { plan, module } => {
            GoalMonitor::new(storage).clear_saving_goal(owner, &plan, &module)?;
            println!("Cleared saving goal on '{}'", module);
        }

        ModuleCommands::SetThreshold {
            plan,
            module,
            amount,
        } => {
            let threshold = Money::parse(&amount).map_err(|e| {
                MoneyplanError::Validation(format!("Invalid amount '{}': {}", amount, e))
            })?;

            let monitor = GoalMonitor::new(storage);
            let updated = monitor.set_emergency_threshold(owner, &plan, &module, threshold)?;

            println!(
                "Set emergency threshold {} on '{}'",
                threshold.format_with_symbol(symbol),
                module
            );
            if let Some(target) = updated.find_module(&module) {
                if target.balance < threshold {
                    println!(
                        "  LOW FUNDS: balance {} is below the threshold",
                        target.balance.format_with_symbol(symbol)
                    );
                }
            }
        }

        ModuleCommands::ClearThreshold { plan, module } => {
            GoalMonitor::new(storage).clear_emergency_threshold(owner, &plan, &module)?;
            println!("Cleared emergency threshold on '{}'", module);
        }
    }

    Ok(())
}
