//! Plan CLI commands
//!
//! Implements CLI commands for plan management, including the
//! interactive two-step creation wizard.

use std::io::{self, Write};
use std::str::FromStr;

use clap::Subcommand;

use crate::display::plan::{format_plan_details, format_plan_list};
use crate::error::{MoneyplanError, MoneyplanResult};
use crate::models::Money;
use crate::services::{GoalMonitor, ModuleSpec, PlanService, PlanWizard, SessionService, MAX_MODULES};
use crate::storage::Storage;

/// Plan subcommands
#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new plan from module specs
    Create {
        /// Plan name
        name: String,
        /// Total balance to partition (e.g., "1000.00" or "1000")
        total: String,
        /// Module spec NAME:PERCENT[:TYPE[:COLOR]], repeatable
        #[arg(short, long = "module", required = true)]
        modules: Vec<String>,
    },
    /// Create a plan interactively, step by step
    Wizard,
    /// List all plans
    List,
    /// Show a plan's balances, goals, alerts, and drift
    Show {
        /// Plan name or ID
        plan: String,
    },
    /// Delete a plan and everything in it
    Delete {
        /// Plan name or ID
        plan: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle a plan command
pub fn handle_plan_command(storage: &Storage, cmd: PlanCommands) -> MoneyplanResult<()> {
    let user = SessionService::new(storage).require_current()?;
    let owner = user.email.as_str();
    let symbol = user.currency_symbol();
    let service = PlanService::new(storage);

    match cmd {
        PlanCommands::Create {
            name,
            total,
            modules,
        } => {
            let total = Money::parse(&total).map_err(|e| {
                MoneyplanError::Validation(format!(
                    "Invalid total format: '{}'. Use format like '1000.00' or '1000'. Error: {}",
                    total, e
                ))
            })?;

            let specs = modules
                .iter()
                .map(|s| ModuleSpec::from_str(s))
                .collect::<MoneyplanResult<Vec<_>>>()?;

            let plan = service.create(owner, &name, total, &specs)?;

            println!("Created plan: {}", plan.name);
            println!("  ID:    {}", plan.id);
            println!(
                "  Total: {}",
                plan.total_balance.format_with_symbol(symbol)
            );
            for module in &plan.modules {
                println!(
                    "  {} ({}) {} -> {}",
                    module.name,
                    module.kind,
                    module.percentage,
                    module.balance.format_with_symbol(symbol)
                );
            }
        }

        PlanCommands::Wizard => {
            run_plan_wizard(storage, owner, symbol)?;
        }

        PlanCommands::List => {
            let plans = service.list(owner)?;
            print!("{}", format_plan_list(&plans, symbol));
        }

        PlanCommands::Show { plan } => {
            let found = service.require(owner, &plan)?;
            let status = GoalMonitor::new(storage).plan_status(&found);
            print!("{}", format_plan_details(&status, symbol));
        }

        PlanCommands::Delete { plan, yes } => {
            let found = service.require(owner, &plan)?;

            if !yes {
                println!("About to delete plan:");
                println!(
                    "  {} ({} modules, {} transactions)",
                    found.name,
                    found.modules.len(),
                    found.transaction_count()
                );
                println!();
                println!("Use --yes to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(owner, &plan)?;
            println!("Deleted plan: {}", deleted.name);
        }
    }

    Ok(())
}

/// Handle the top-level reset command
pub fn handle_reset(storage: &Storage, yes: bool) -> MoneyplanResult<()> {
    let user = SessionService::new(storage).require_current()?;
    let service = PlanService::new(storage);

    if !yes {
        let count = service.count(&user.email)?;
        println!("About to delete all {} plans for {}.", count, user.email);
        println!();
        println!("Use --yes to confirm reset");
        return Ok(());
    }

    let removed = service.reset(&user.email)?;
    println!("Deleted {} plans.", removed);

    Ok(())
}

/// Run the interactive two-step plan wizard
fn run_plan_wizard(storage: &Storage, owner: &str, symbol: &str) -> MoneyplanResult<()> {
    println!();
    println!("===========================================");
    println!("  Moneyplan Plan Wizard");
    println!("===========================================");
    println!();
    println!("Press Ctrl+C at any time to cancel. Nothing is saved");
    println!("until you confirm at the end.");
    println!();

    let mut wizard = PlanWizard::new();

    // Step 1: plan basics
    println!("Step 1 of 2: Plan basics");
    loop {
        let name = prompt_string("  Plan name: ")?;
        let total_input = prompt_string("  Total balance: ")?;
        let total = match Money::parse(&total_input) {
            Ok(total) => total,
            Err(e) => {
                println!("  Invalid amount '{}': {}. Please try again.", total_input, e);
                continue;
            }
        };
        let count_input =
            prompt_string(&format!("  Number of modules (1-{}): ", MAX_MODULES))?;
        let count = match count_input.parse::<usize>() {
            Ok(count) => count,
            Err(_) => {
                println!("  Invalid number '{}'. Please try again.", count_input);
                continue;
            }
        };

        match wizard.step1(&name, total, count) {
            Ok(()) => break,
            Err(e) => println!("  {}. Please try again.", e),
        }
    }

    // Step 2: module allocation
    println!();
    println!("Step 2 of 2: Module allocation");
    println!("  Enter each module as NAME:PERCENT[:TYPE[:COLOR]], e.g. Food:60");
    println!("  Types: expense, income, saving, emergency, custom");
    let count = wizard
        .module_count()
        .ok_or_else(|| MoneyplanError::Validation("Wizard lost step 1 state".into()))?;

    loop {
        let mut specs = Vec::with_capacity(count);
        for i in 1..=count {
            loop {
                let input = prompt_string(&format!("  Module {} of {}: ", i, count))?;
                match ModuleSpec::from_str(&input) {
                    Ok(spec) => {
                        specs.push(spec);
                        break;
                    }
                    Err(e) => println!("  {}. Please try again.", e),
                }
            }
        }

        match wizard.step2(specs) {
            Ok(()) => break,
            Err(e) => println!("  {}. Please re-enter the modules.", e),
        }
    }

    // Summary and confirmation
    println!();
    println!("===========================================");
    println!("  Plan Summary");
    println!("===========================================");
    if let (Some(name), Some(total)) = (wizard.plan_name(), wizard.total_balance()) {
        println!("  Name:  {}", name);
        println!("  Total: {}", total.format_with_symbol(symbol));
    }
    println!();

    let confirm = prompt_string("Create this plan? (yes/no) [yes]: ")?;
    if !confirm.is_empty() && confirm.to_lowercase() != "yes" && confirm.to_lowercase() != "y" {
        println!("Wizard cancelled. Nothing was saved.");
        return Ok(());
    }

    let plan = wizard.commit(storage, owner)?;

    println!();
    println!("Created plan: {}", plan.name);
    for module in &plan.modules {
        println!(
            "  {} ({}) {} -> {}",
            module.name,
            module.kind,
            module.percentage,
            module.balance.format_with_symbol(symbol)
        );
    }

    Ok(())
}

fn prompt_string(prompt: &str) -> MoneyplanResult<String> {
    print!("{}", prompt);
    io::stdout()
        .flush()
        .map_err(|e| MoneyplanError::Io(e.to_string()))?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| MoneyplanError::Io(e.to_string()))?;

    Ok(input.trim().to_string())
}
