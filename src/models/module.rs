//! Module model
//!
//! A module is a named bucket inside a plan. It holds a percentage-derived
//! share of the plan's total balance and its own transaction history, plus an
//! optional saving goal or emergency threshold depending on its kind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ModuleId;
use super::money::Money;
use super::percent::Percent;
use super::transaction::Transaction;

/// Kind of budget module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// Day-to-day spending bucket
    Expense,
    /// Bucket for expected inflows
    Income,
    /// Savings bucket, may carry a goal
    Saving,
    /// Emergency fund, may carry a low-balance threshold
    Emergency,
    /// Anything else
    Custom,
}

impl ModuleKind {
    /// Parse a kind from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "expense" => Some(Self::Expense),
            "income" => Some(Self::Income),
            "saving" => Some(Self::Saving),
            "emergency" => Some(Self::Emergency),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

impl Default for ModuleKind {
    fn default() -> Self {
        Self::Expense
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "expense"),
            Self::Income => write!(f, "income"),
            Self::Saving => write!(f, "saving"),
            Self::Emergency => write!(f, "emergency"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// Default module colors, cycled by position at plan creation
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#FFB6C1", "#B6E0FF", "#B6FFD9", "#FFF7B6", "#FFB6F9", "#B6FFB6", "#FFD6B6", "#B6B6FF",
];

/// The default color for a module at the given position
pub fn default_color(position: usize) -> &'static str {
    DEFAULT_PALETTE[position % DEFAULT_PALETTE.len()]
}

/// Check a `#rrggbb` color string
pub fn is_valid_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Target for a saving-type module
///
/// Either a share of the plan's total balance or an absolute amount. Percent
/// goals resolve against the plan total at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavingGoal {
    Percent(Percent),
    Amount(Money),
}

impl SavingGoal {
    /// Resolve the goal to an absolute target amount
    pub fn target_amount(&self, plan_total: Money) -> Money {
        match self {
            SavingGoal::Percent(p) => p.share_of(plan_total),
            SavingGoal::Amount(a) => *a,
        }
    }
}

impl fmt::Display for SavingGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SavingGoal::Percent(p) => write!(f, "{}", p),
            SavingGoal::Amount(a) => write!(f, "{}", a),
        }
    }
}

/// A named bucket holding a share of a plan's balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// Unique identifier
    pub id: ModuleId,

    /// Kind of bucket
    #[serde(rename = "type")]
    pub kind: ModuleKind,

    /// Module name (e.g., "Food")
    pub name: String,

    /// Share of the plan total allocated at creation
    pub percentage: Percent,

    /// Display color (`#rrggbb`)
    pub color: String,

    /// Authoritative current amount; drifts from the percentage baseline as
    /// transactions apply
    pub balance: Money,

    /// Transaction history, most recent first
    #[serde(default)]
    pub transactions: Vec<Transaction>,

    /// Target for saving-type modules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saving_goal: Option<SavingGoal>,

    /// Low-balance alert level for emergency-type modules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_threshold: Option<Money>,

    /// When the module was created
    pub created_at: DateTime<Utc>,

    /// When the module was last modified
    pub updated_at: DateTime<Utc>,
}

impl Module {
    /// Create a new module with its initial allocated balance
    pub fn new(
        kind: ModuleKind,
        name: impl Into<String>,
        percentage: Percent,
        color: impl Into<String>,
        balance: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ModuleId::new(),
            kind,
            name: name.into(),
            percentage,
            color: color.into(),
            balance,
            transactions: Vec::new(),
            saving_goal: None,
            emergency_threshold: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Push a transaction to the front of the history
    pub fn prepend_transaction(&mut self, txn: Transaction) {
        self.transactions.insert(0, txn);
        self.updated_at = Utc::now();
    }

    /// Rename the module
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    /// Change the allocation percentage (balance is adjusted by the caller)
    pub fn set_percentage(&mut self, percentage: Percent) {
        self.percentage = percentage;
        self.updated_at = Utc::now();
    }

    /// Change the display color
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
        self.updated_at = Utc::now();
    }

    /// Set or replace the saving goal
    pub fn set_saving_goal(&mut self, goal: SavingGoal) {
        self.saving_goal = Some(goal);
        self.updated_at = Utc::now();
    }

    /// Remove the saving goal
    pub fn clear_saving_goal(&mut self) {
        self.saving_goal = None;
        self.updated_at = Utc::now();
    }

    /// Set or replace the emergency threshold
    pub fn set_emergency_threshold(&mut self, threshold: Money) {
        self.emergency_threshold = Some(threshold);
        self.updated_at = Utc::now();
    }

    /// Remove the emergency threshold
    pub fn clear_emergency_threshold(&mut self) {
        self.emergency_threshold = None;
        self.updated_at = Utc::now();
    }

    /// Validate the module
    pub fn validate(&self) -> Result<(), ModuleValidationError> {
        if self.name.trim().is_empty() {
            return Err(ModuleValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(ModuleValidationError::NameTooLong(self.name.len()));
        }

        if !is_valid_color(&self.color) {
            return Err(ModuleValidationError::InvalidColor(self.color.clone()));
        }

        if let Some(SavingGoal::Amount(amount)) = self.saving_goal {
            if amount.is_negative() {
                return Err(ModuleValidationError::NegativeGoal(amount));
            }
        }

        if let Some(threshold) = self.emergency_threshold {
            if threshold.is_negative() {
                return Err(ModuleValidationError::NegativeThreshold(threshold));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// Validation errors for modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
    NegativeGoal(Money),
    NegativeThreshold(Money),
}

impl fmt::Display for ModuleValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Module name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Module name too long ({} chars, max 50)", len)
            }
            Self::InvalidColor(color) => {
                write!(f, "Invalid color '{}', expected #rrggbb", color)
            }
            Self::NegativeGoal(amount) => {
                write!(f, "Saving goal cannot be negative, got {}", amount)
            }
            Self::NegativeThreshold(amount) => {
                write!(f, "Emergency threshold cannot be negative, got {}", amount)
            }
        }
    }
}

impl std::error::Error for ModuleValidationError {}
