//! Transaction model
//!
//! A transaction is a single expense or income event against one module.
//! Transactions are immutable once created: there is no per-transaction edit
//! or delete, only whole-module deletion.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Kind of transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money leaving the module
    Expense,
    /// Money entering the module
    Income,
}

impl TransactionKind {
    /// Parse a kind from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "expense" => Some(Self::Expense),
            "income" => Some(Self::Income),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "expense"),
            Self::Income => write!(f, "income"),
        }
    }
}

/// A single expense or income event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Expense or income
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Short label (e.g., "Groceries")
    pub title: String,

    /// Amount, always positive; the kind carries the direction
    pub amount: Money,

    /// Calendar date the event applies to
    pub date: NaiveDate,

    /// Optional free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Symbol of the owning user's currency at record time
    pub currency_symbol: String,

    /// When the transaction was recorded
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        kind: TransactionKind,
        title: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        currency_symbol: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            kind,
            title: title.into(),
            amount,
            date,
            description: None,
            currency_symbol: currency_symbol.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a new transaction with a description
    pub fn with_description(
        kind: TransactionKind,
        title: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        currency_symbol: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let mut txn = Self::new(kind, title, amount, date, currency_symbol);
        txn.description = Some(description.into());
        txn
    }

    /// Format the amount with this transaction's currency symbol
    pub fn display_amount(&self) -> String {
        self.amount.format_with_symbol(&self.currency_symbol)
    }

    /// Case-insensitive match against title and description
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        if self.title.to_lowercase().contains(&query) {
            return true;
        }
        self.description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&query))
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.title.trim().is_empty() {
            return Err(TransactionValidationError::EmptyTitle);
        }

        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} '{}' {}",
            self.date,
            self.kind,
            self.title,
            self.display_amount()
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyTitle,
    NonPositiveAmount(Money),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Transaction title cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be positive, got {}", amount)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
