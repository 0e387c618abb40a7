//! Transaction CLI commands
//!
//! Implements CLI commands for recording and listing transactions.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::error::{MoneyplanError, MoneyplanResult};
use crate::models::{Money, TransactionKind};
use crate::reports::{ActivityQuery, ActivityReport};
use crate::services::{LedgerService, PlanService, RecordedTransaction, SessionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an expense against a module
    Expense {
        /// Plan name or ID
        plan: String,
        /// Module name or ID
        module: String,
        /// Transaction title
        title: String,
        /// Amount (e.g., "50.00" or "50")
        amount: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Optional note
        #[arg(short = 'D', long)]
        description: Option<String>,
    },
    /// Record income into a module
    Income {
        /// Plan name or ID
        plan: String,
        /// Module name or ID
        module: String,
        /// Transaction title
        title: String,
        /// Amount (e.g., "50.00" or "50")
        amount: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Optional note
        #[arg(short = 'D', long)]
        description: Option<String>,
    },
    /// List transactions in a plan
    List {
        /// Plan name or ID
        plan: String,
        /// Filter by module name
        #[arg(short, long)]
        module: Option<String>,
        /// Filter by kind (expense, income)
        #[arg(short, long)]
        kind: Option<String>,
        /// Only transactions on this date (YYYY-MM-DD)
        #[arg(long)]
        on: Option<String>,
        /// Case-insensitive match against title and description
        #[arg(short, long)]
        search: Option<String>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    cmd: TransactionCommands,
) -> MoneyplanResult<()> {
    let user = SessionService::new(storage).require_current()?;
    let owner = user.email.as_str();
    let symbol = user.currency_symbol();
    let ledger = LedgerService::new(storage);

    match cmd {
        TransactionCommands::Expense {
            plan,
            module,
            title,
            amount,
            date,
            description,
        } => {
            let amount = parse_amount(&amount)?;
            let date = parse_date_or_today(date)?;

            let recorded = ledger.record_expense(
                owner,
                &plan,
                &module,
                &title,
                amount,
                date,
                description.as_deref(),
            )?;

            print_recorded("expense", &recorded, symbol);
        }

        TransactionCommands::Income {
            plan,
            module,
            title,
            amount,
            date,
            description,
        } => {
            let amount = parse_amount(&amount)?;
            let date = parse_date_or_today(date)?;

            let recorded = ledger.record_income(
                owner,
                &plan,
                &module,
                &title,
                amount,
                date,
                description.as_deref(),
            )?;

            print_recorded("income", &recorded, symbol);
        }

        TransactionCommands::List {
            plan,
            module,
            kind,
            on,
            search,
        } => {
            let found = PlanService::new(storage).require(owner, &plan)?;

            let kind = match kind.as_deref() {
                None => None,
                Some(raw) => Some(TransactionKind::parse(raw).ok_or_else(|| {
                    MoneyplanError::Validation(format!(
                        "Invalid kind: '{}'. Use expense or income",
                        raw
                    ))
                })?),
            };

            let date = on.map(|s| parse_date(&s)).transpose()?;

            let query = ActivityQuery {
                date,
                kind,
                plan: Some(found.name.clone()),
                module,
                search,
            };
            let report = ActivityReport::generate(&[found], &query);

            print!("{}", report.format_terminal());
        }
    }

    Ok(())
}

fn print_recorded(label: &str, recorded: &RecordedTransaction, symbol: &str) {
    println!("Recorded {}:", label);
    println!("  Title:  {}", recorded.transaction.title);
    println!("  Amount: {}", recorded.transaction.display_amount());
    println!("  Date:   {}", recorded.transaction.date);
    if let Some(description) = &recorded.transaction.description {
        println!("  Note:   {}", description);
    }
    println!(
        "  Module: {} (balance {})",
        recorded.module_name,
        recorded.module_balance.format_with_symbol(symbol)
    );
    println!(
        "  Plan total: {}",
        recorded.plan.total_balance.format_with_symbol(symbol)
    );
}

fn parse_amount(input: &str) -> MoneyplanResult<Money> {
    Money::parse(input).map_err(|e| {
        MoneyplanError::Validation(format!(
            "Invalid amount format: '{}'. Use format like '50.00' or '50'. Error: {}",
            input, e
        ))
    })
}

fn parse_date(input: &str) -> MoneyplanResult<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        MoneyplanError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", input))
    })
}

fn parse_date_or_today(date: Option<String>) -> MoneyplanResult<NaiveDate> {
    match date {
        Some(date_str) => parse_date(&date_str),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
