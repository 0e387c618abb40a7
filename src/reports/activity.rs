//! Cross-plan activity report
//!
//! Flattens every module's transaction history into a single list with
//! optional date, kind, plan, and text filters. Entries carry the plan
//! and module they belong to, newest first.

use chrono::NaiveDate;

use crate::models::{Money, Plan, Transaction, TransactionKind};

/// Filters applied when generating an activity report
#[derive(Debug, Clone, Default)]
pub struct ActivityQuery {
    /// Only transactions on this exact date
    pub date: Option<NaiveDate>,
    /// Only expenses or only income
    pub kind: Option<TransactionKind>,
    /// Only transactions from the plan with this name
    pub plan: Option<String>,
    /// Only transactions from the module with this name
    pub module: Option<String>,
    /// Case-insensitive match against title and description
    pub search: Option<String>,
}

/// One transaction together with the plan and module it belongs to
#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub plan_name: String,
    pub module_name: String,
    pub module_color: String,
    pub transaction: Transaction,
}

/// Activity report across all plans
#[derive(Debug, Clone)]
pub struct ActivityReport {
    pub entries: Vec<ActivityEntry>,
    pub total_expense: Money,
    pub total_income: Money,
}

impl ActivityReport {
    /// Generate a filtered, flattened view of every transaction
    pub fn generate(plans: &[Plan], query: &ActivityQuery) -> Self {
        let mut entries = Vec::new();

        for plan in plans {
            if let Some(plan_filter) = &query.plan {
                if !plan.name.eq_ignore_ascii_case(plan_filter) {
                    continue;
                }
            }
            for module in &plan.modules {
                if let Some(module_filter) = &query.module {
                    if !module.name.eq_ignore_ascii_case(module_filter) {
                        continue;
                    }
                }
                for txn in &module.transactions {
                    if let Some(date) = query.date {
                        if txn.date != date {
                            continue;
                        }
                    }
                    if let Some(kind) = query.kind {
                        if txn.kind != kind {
                            continue;
                        }
                    }
                    if let Some(search) = &query.search {
                        if !txn.matches_search(search) {
                            continue;
                        }
                    }
                    entries.push(ActivityEntry {
                        plan_name: plan.name.clone(),
                        module_name: module.name.clone(),
                        module_color: module.color.clone(),
                        transaction: txn.clone(),
                    });
                }
            }
        }

        entries.sort_by(|a, b| {
            b.transaction
                .date
                .cmp(&a.transaction.date)
                .then(b.transaction.created_at.cmp(&a.transaction.created_at))
        });

        let mut total_expense = Money::zero();
        let mut total_income = Money::zero();
        for entry in &entries {
            match entry.transaction.kind {
                TransactionKind::Expense => total_expense += entry.transaction.amount,
                TransactionKind::Income => total_income += entry.transaction.amount,
            }
        }

        Self {
            entries,
            total_expense,
            total_income,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Activity\n");
        output.push_str(&"=".repeat(80));
        output.push('\n');

        if self.entries.is_empty() {
            output.push_str("No matching transactions.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<12} {:<8} {:<24} {:>12} {:<15} {:<15}\n",
            "Date", "Type", "Title", "Amount", "Plan", "Module"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for entry in &self.entries {
            let txn = &entry.transaction;
            output.push_str(&format!(
                "{:<12} {:<8} {:<24} {:>12} {:<15} {:<15}\n",
                txn.date.to_string(),
                txn.kind.to_string(),
                truncate(&txn.title, 24),
                txn.display_amount(),
                truncate(&entry.plan_name, 15),
                truncate(&entry.module_name, 15)
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{} transactions | Expenses: {} | Income: {}\n",
            self.entries.len(),
            self.total_expense,
            self.total_income
        ));

        output
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Module, ModuleKind, Percent};
    use rust_decimal::Decimal;

    fn pct(value: i64) -> Percent {
        Percent::new(Decimal::from(value)).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
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
            Transaction::new(
                TransactionKind::Expense,
                "Groceries",
                Money::from_major(100),
                date("2025-06-10"),
                "$",
            ),
            Transaction::with_description(
                TransactionKind::Expense,
                "Dining",
                Money::from_major(40),
                date("2025-06-12"),
                "$",
                "birthday dinner",
            ),
        ];

        let mut salary = Module::new(
            ModuleKind::Income,
            "Salary",
            pct(40),
            "#B6E0FF",
            Money::from_major(400),
        );
        salary.transactions = vec![Transaction::new(
            TransactionKind::Income,
            "Paycheck",
            Money::from_major(2000),
            date("2025-06-10"),
            "$",
        )];

        vec![
            Plan::new("June", Money::from_major(1000), vec![food]),
            Plan::new("Household", Money::from_major(400), vec![salary]),
        ]
    }

    #[test]
    fn test_flattens_all_plans_newest_first() {
        let report = ActivityReport::generate(&test_plans(), &ActivityQuery::default());

        assert_eq!(report.len(), 3);
        assert_eq!(report.entries[0].transaction.title, "Dining");
        assert_eq!(report.entries[0].plan_name, "June");
        assert_eq!(report.entries[0].module_name, "Food");
        assert_eq!(report.total_expense, Money::from_major(140));
        assert_eq!(report.total_income, Money::from_major(2000));
    }

    #[test]
    fn test_filter_by_date() {
        let query = ActivityQuery {
            date: Some(date("2025-06-10")),
            ..Default::default()
        };
        let report = ActivityReport::generate(&test_plans(), &query);

        assert_eq!(report.len(), 2);
        assert!(report
            .entries
            .iter()
            .all(|e| e.transaction.date == date("2025-06-10")));
    }

    #[test]
    fn test_filter_by_kind() {
        let query = ActivityQuery {
            kind: Some(TransactionKind::Income),
            ..Default::default()
        };
        let report = ActivityReport::generate(&test_plans(), &query);

        assert_eq!(report.len(), 1);
        assert_eq!(report.entries[0].transaction.title, "Paycheck");
        assert_eq!(report.total_expense, Money::zero());
    }

    #[test]
    fn test_filter_by_plan_name() {
        let query = ActivityQuery {
            plan: Some("household".to_string()),
            ..Default::default()
        };
        let report = ActivityReport::generate(&test_plans(), &query);

        assert_eq!(report.len(), 1);
        assert_eq!(report.entries[0].plan_name, "Household");
    }

    #[test]
    fn test_filter_by_module_name() {
        let query = ActivityQuery {
            module: Some("food".to_string()),
            ..Default::default()
        };
        let report = ActivityReport::generate(&test_plans(), &query);

        assert_eq!(report.len(), 2);
        assert!(report.entries.iter().all(|e| e.module_name == "Food"));
    }

    #[test]
    fn test_search_matches_description() {
        let query = ActivityQuery {
            search: Some("birthday".to_string()),
            ..Default::default()
        };
        let report = ActivityReport::generate(&test_plans(), &query);

        assert_eq!(report.len(), 1);
        assert_eq!(report.entries[0].transaction.title, "Dining");
    }

    #[test]
    fn test_no_matches() {
        let query = ActivityQuery {
            search: Some("vacation".to_string()),
            ..Default::default()
        };
        let report = ActivityReport::generate(&test_plans(), &query);

        assert!(report.is_empty());
        assert!(report.format_terminal().contains("No matching transactions"));
    }
}
