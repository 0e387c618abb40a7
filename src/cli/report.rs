//! CLI commands for reports
//!
//! Provides commands for spending trends and per-day activity views.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::error::{MoneyplanError, MoneyplanResult};
use crate::models::TransactionKind;
use crate::reports::{ActivityQuery, ActivityReport, TrendPeriod, TrendReport};
use crate::services::{PlanService, SessionService};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Expense and income totals per day over a rolling window
    Trend {
        /// Window: 7days, 30days, 6months, or 12months
        #[arg(short, long, default_value = "30days")]
        period: String,
    },
    /// All transactions on one date, across every plan
    Day {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Case-insensitive match against title and description
        #[arg(short, long)]
        search: Option<String>,
        /// Filter by kind (expense, income)
        #[arg(short, long)]
        kind: Option<String>,
    },
}

/// Handle a report command
pub fn handle_report_command(storage: &Storage, cmd: ReportCommands) -> MoneyplanResult<()> {
    let user = SessionService::new(storage).require_current()?;
    let plans = PlanService::new(storage).list(&user.email)?;

    match cmd {
        ReportCommands::Trend { period } => {
            let period: TrendPeriod = period.parse()?;
            let today = chrono::Local::now().date_naive();

            let report = TrendReport::generate(&plans, period, today);
            println!("{}", report.format_terminal());
        }

        ReportCommands::Day { date, search, kind } => {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| {
                MoneyplanError::Validation(format!(
                    "Invalid date format: '{}'. Use YYYY-MM-DD",
                    date
                ))
            })?;

            let kind = match kind.as_deref() {
                None => None,
                Some(raw) => Some(TransactionKind::parse(raw).ok_or_else(|| {
                    MoneyplanError::Validation(format!(
                        "Invalid kind: '{}'. Use expense or income",
                        raw
                    ))
                })?),
            };

            let query = ActivityQuery {
                date: Some(date),
                kind,
                search,
                ..Default::default()
            };
            let report = ActivityReport::generate(&plans, &query);

            println!("{}", report.format_terminal());
        }
    }

    Ok(())
}
