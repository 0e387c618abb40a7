//! Plan model
//!
//! A plan is a budget: a total balance split across modules. The plan
//! exclusively owns its modules and, through them, every transaction.
//! Deleting a plan cascades.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ModuleId, PlanId};
use super::module::Module;
use super::money::Money;

/// A budget with a total balance split across modules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Unique identifier
    pub id: PlanId,

    /// Plan name (e.g., "June")
    pub name: String,

    /// Plan-level total; equals the sum of module balances after every
    /// committed operation
    pub total_balance: Money,

    /// Modules in insertion order; identity is by id, not position
    pub modules: Vec<Module>,

    /// When the plan was created
    pub created_at: DateTime<Utc>,

    /// When the plan was last modified
    pub updated_at: DateTime<Utc>,
}

impl Plan {
    /// Create a new plan from already-allocated modules
    pub fn new(name: impl Into<String>, total_balance: Money, modules: Vec<Module>) -> Self {
        let now = Utc::now();
        Self {
            id: PlanId::new(),
            name: name.into(),
            total_balance,
            modules,
            created_at: now,
            updated_at: now,
        }
    }

    /// Look up a module by id
    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    /// Look up a module by id, mutably
    pub fn module_mut(&mut self, id: ModuleId) -> Option<&mut Module> {
        self.modules.iter_mut().find(|m| m.id == id)
    }

    /// Look up a module by name (case-insensitive)
    pub fn module_by_name(&self, name: &str) -> Option<&Module> {
        self.modules
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    /// Resolve a module by name or id string
    pub fn find_module(&self, identifier: &str) -> Option<&Module> {
        if let Some(module) = self.module_by_name(identifier) {
            return Some(module);
        }
        if let Ok(id) = identifier.parse::<ModuleId>() {
            return self.module(id);
        }
        None
    }

    /// Sum of all module balances
    pub fn module_balance_total(&self) -> Money {
        self.modules.iter().map(|m| m.balance).sum()
    }

    /// Sum of all module percentages
    pub fn percentage_total(&self) -> Decimal {
        self.modules.iter().map(|m| m.percentage.value()).sum()
    }

    /// Whether the plan total matches the sum of module balances
    pub fn is_balanced(&self) -> bool {
        self.total_balance == self.module_balance_total()
    }

    /// Whether structural edits have left the percentages summing away
    /// from 100
    pub fn has_allocation_drift(&self) -> bool {
        self.percentage_total() != Decimal::ONE_HUNDRED
    }

    /// Total number of transactions across all modules
    pub fn transaction_count(&self) -> usize {
        self.modules.iter().map(|m| m.transactions.len()).sum()
    }

    /// Mark the plan as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the plan
    pub fn validate(&self) -> Result<(), PlanValidationError> {
        if self.name.trim().is_empty() {
            return Err(PlanValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(PlanValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} modules)", self.name, self.modules.len())
    }
}

/// Validation errors for plans
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for PlanValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Plan name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Plan name too long ({} chars, max 100)", len)
            }
        }
    }
}

impl std::error::Error for PlanValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_color, ModuleKind, Percent};

    fn june_plan() -> Plan {
        let food = Module::new(
            ModuleKind::Expense,
            "Food",
            Percent::parse("60").unwrap(),
            default_color(0),
            Money::from_major(600),
        );
        let rent = Module::new(
            ModuleKind::Expense,
            "Rent",
            Percent::parse("40").unwrap(),
            default_color(1),
            Money::from_major(400),
        );
        Plan::new("June", Money::from_major(1000), vec![food, rent])
    }

    #[test]
    fn test_new_plan() {
        let plan = june_plan();
        assert_eq!(plan.name, "June");
        assert_eq!(plan.modules.len(), 2);
        assert_eq!(plan.total_balance, Money::from_major(1000));
        assert!(plan.is_balanced());
        assert!(!plan.has_allocation_drift());
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_module_lookup_by_name_case_insensitive() {
        let plan = june_plan();
        assert!(plan.module_by_name("food").is_some());
        assert!(plan.module_by_name("FOOD").is_some());
        assert!(plan.module_by_name("fuel").is_none());
    }

    #[test]
    fn test_find_module_by_id_string() {
        let plan = june_plan();
        let id = plan.modules[0].id;

        let by_full = plan.find_module(&id.as_uuid().to_string());
        assert_eq!(by_full.map(|m| m.id), Some(id));

        let by_prefixed = plan.find_module(&format!("mod-{}", id.as_uuid()));
        assert_eq!(by_prefixed.map(|m| m.id), Some(id));

        assert!(plan.find_module("no-such-module").is_none());
    }

    #[test]
    fn test_balance_total_detects_imbalance() {
        let mut plan = june_plan();
        assert!(plan.is_balanced());

        plan.total_balance = Money::from_major(900);
        assert!(!plan.is_balanced());
    }

    #[test]
    fn test_allocation_drift() {
        let mut plan = june_plan();
        assert!(!plan.has_allocation_drift());

        // Rent 40 -> 50 leaves the sum at 110
        plan.modules[1].set_percentage(Percent::parse("50").unwrap());
        assert!(plan.has_allocation_drift());
    }

    #[test]
    fn test_validate_empty_name() {
        let mut plan = june_plan();
        plan.name = " ".into();
        assert_eq!(plan.validate(), Err(PlanValidationError::EmptyName));
    }
}
