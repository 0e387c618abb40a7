//! Spending trend report
//!
//! Aggregates expense and income totals per day across every plan, over
//! a rolling window ending today. Only days with activity appear, sorted
//! oldest first.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Months, NaiveDate};

use crate::error::MoneyplanError;
use crate::models::{Money, Plan, TransactionKind};

/// Rolling window for the trend report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendPeriod {
    SevenDays,
    #[default]
    ThirtyDays,
    SixMonths,
    TwelveMonths,
}

impl TrendPeriod {
    /// First date included in the window
    pub fn start_date(&self, today: NaiveDate) -> NaiveDate {
        match self {
            TrendPeriod::SevenDays => today - Duration::days(7),
            TrendPeriod::ThirtyDays => today - Duration::days(30),
            TrendPeriod::SixMonths => today - Months::new(6),
            TrendPeriod::TwelveMonths => today - Months::new(12),
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            TrendPeriod::SevenDays => "Last 7 Days",
            TrendPeriod::ThirtyDays => "Last 30 Days",
            TrendPeriod::SixMonths => "Last 6 Months",
            TrendPeriod::TwelveMonths => "Last 12 Months",
        }
    }
}

impl fmt::Display for TrendPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            TrendPeriod::SevenDays => "7days",
            TrendPeriod::ThirtyDays => "30days",
            TrendPeriod::SixMonths => "6months",
            TrendPeriod::TwelveMonths => "12months",
        };
        write!(f, "{}", token)
    }
}

impl FromStr for TrendPeriod {
    type Err = MoneyplanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "7days" | "7d" => Ok(TrendPeriod::SevenDays),
            "30days" | "30d" => Ok(TrendPeriod::ThirtyDays),
            "6months" | "6m" => Ok(TrendPeriod::SixMonths),
            "12months" | "12m" => Ok(TrendPeriod::TwelveMonths),
            other => Err(MoneyplanError::Validation(format!(
                "Unknown trend period '{}' (expected 7days, 30days, 6months, or 12months)",
                other
            ))),
        }
    }
}

/// Expense and income totals for one day
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub expense: Money,
    pub income: Money,
}

/// Trend report across all plans
#[derive(Debug, Clone)]
pub struct TrendReport {
    pub period: TrendPeriod,
    pub start_date: NaiveDate,
    pub points: Vec<TrendPoint>,
    pub total_expense: Money,
    pub total_income: Money,
}

impl TrendReport {
    /// Generate a trend report over every transaction in the given plans
    pub fn generate(plans: &[Plan], period: TrendPeriod, today: NaiveDate) -> Self {
        let start_date = period.start_date(today);

        let mut buckets: BTreeMap<NaiveDate, (Money, Money)> = BTreeMap::new();
        for plan in plans {
            for module in &plan.modules {
                for txn in &module.transactions {
                    if txn.date < start_date {
                        continue;
                    }
                    let entry = buckets
                        .entry(txn.date)
                        .or_insert((Money::zero(), Money::zero()));
                    match txn.kind {
                        TransactionKind::Expense => entry.0 += txn.amount,
                        TransactionKind::Income => entry.1 += txn.amount,
                    }
                }
            }
        }

        let mut total_expense = Money::zero();
        let mut total_income = Money::zero();
        let points = buckets
            .into_iter()
            .map(|(date, (expense, income))| {
                total_expense += expense;
                total_income += income;
                TrendPoint {
                    date,
                    expense,
                    income,
                }
            })
            .collect();

        Self {
            period,
            start_date,
            points,
            total_expense,
            total_income,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Spending Trend: {} (from {})\n",
            self.period.label(),
            self.start_date
        ));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        if self.points.is_empty() {
            output.push_str("No transactions in this period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<12} {:>15} {:>15}\n",
            "Date", "Expense", "Income"
        ));
        output.push_str(&"-".repeat(50));
        output.push('\n');

        for point in &self.points {
            output.push_str(&format!(
                "{:<12} {:>15} {:>15}\n",
                point.date.to_string(),
                point.expense.to_string(),
                point.income.to_string()
            ));
        }

        output.push_str(&"-".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "{:<12} {:>15} {:>15}\n",
            "TOTAL",
            self.total_expense.to_string(),
            self.total_income.to_string()
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Module, ModuleKind, Percent, Transaction};
    use rust_decimal::Decimal;

    fn pct(value: i64) -> Percent {
        Percent::new(Decimal::from(value)).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn txn(kind: TransactionKind, amount: i64, on: &str) -> Transaction {
        Transaction::new(kind, "txn", Money::from_major(amount), date(on), "$")
    }

    fn test_plans() -> Vec<Plan> {
        let mut food = Module::new(
            ModuleKind::Expense,
            "Food",
            pct(60),
            "#FFB6C1",
            Money::from_major(600),
        );
        food.transactions = vec![
            txn(TransactionKind::Expense, 100, "2025-06-10"),
            txn(TransactionKind::Expense, 40, "2025-06-12"),
            txn(TransactionKind::Expense, 25, "2024-01-01"),
        ];

        let mut rent = Module::new(
            ModuleKind::Expense,
            "Rent",
            pct(40),
            "#B6E0FF",
            Money::from_major(400),
        );
        rent.transactions = vec![txn(TransactionKind::Income, 75, "2025-06-10")];

        vec![
            Plan::new("June", Money::from_major(1000), vec![food]),
            Plan::new("Household", Money::from_major(400), vec![rent]),
        ]
    }

    #[test]
    fn test_period_parsing() {
        assert_eq!("7days".parse::<TrendPeriod>().unwrap(), TrendPeriod::SevenDays);
        assert_eq!("30D".parse::<TrendPeriod>().unwrap(), TrendPeriod::ThirtyDays);
        assert_eq!(
            "12months".parse::<TrendPeriod>().unwrap(),
            TrendPeriod::TwelveMonths
        );
        assert!("quarter".parse::<TrendPeriod>().is_err());
    }

    #[test]
    fn test_start_date_windows() {
        let today = date("2025-06-15");
        assert_eq!(
            TrendPeriod::SevenDays.start_date(today),
            date("2025-06-08")
        );
        assert_eq!(
            TrendPeriod::SixMonths.start_date(today),
            date("2024-12-15")
        );
        assert_eq!(
            TrendPeriod::TwelveMonths.start_date(today),
            date("2024-06-15")
        );
    }

    #[test]
    fn test_buckets_by_date_across_plans() {
        let report = TrendReport::generate(
            &test_plans(),
            TrendPeriod::ThirtyDays,
            date("2025-06-15"),
        );

        // The 2024 transaction falls outside the window
        assert_eq!(report.points.len(), 2);

        // Same-day expense and income from different plans share a point
        assert_eq!(report.points[0].date, date("2025-06-10"));
        assert_eq!(report.points[0].expense, Money::from_major(100));
        assert_eq!(report.points[0].income, Money::from_major(75));

        assert_eq!(report.points[1].date, date("2025-06-12"));
        assert_eq!(report.points[1].expense, Money::from_major(40));
        assert_eq!(report.points[1].income, Money::zero());

        assert_eq!(report.total_expense, Money::from_major(140));
        assert_eq!(report.total_income, Money::from_major(75));
    }

    #[test]
    fn test_longer_window_includes_older_activity() {
        let report = TrendReport::generate(
            &test_plans(),
            TrendPeriod::TwelveMonths,
            date("2024-06-15"),
        );

        assert_eq!(report.points.len(), 1);
        assert_eq!(report.points[0].date, date("2024-01-01"));
    }

    #[test]
    fn test_empty_report() {
        let report =
            TrendReport::generate(&[], TrendPeriod::ThirtyDays, date("2025-06-15"));
        assert!(report.points.is_empty());
        assert!(report.format_terminal().contains("No transactions"));
    }
}
