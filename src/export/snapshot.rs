//! Read-only plan snapshot consumed by the export writers
//!
//! The writers depend only on this view, never on storage or services.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Module, ModuleKind, Money, Plan, Transaction, TransactionKind};

/// Exportable view of one plan
#[derive(Debug, Clone, Serialize)]
pub struct PlanSnapshot {
    pub plan_name: String,
    pub modules: Vec<ModuleSnapshot>,
}

/// Exportable view of one module
#[derive(Debug, Clone, Serialize)]
pub struct ModuleSnapshot {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ModuleKind,
    pub transactions: Vec<TransactionSnapshot>,
}

/// Exportable view of one transaction
#[derive(Debug, Clone, Serialize)]
pub struct TransactionSnapshot {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub title: String,
    pub amount: Money,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub currency_symbol: String,
}

impl PlanSnapshot {
    pub fn from_plan(plan: &Plan) -> Self {
        Self {
            plan_name: plan.name.clone(),
            modules: plan.modules.iter().map(ModuleSnapshot::from_module).collect(),
        }
    }

    pub fn transaction_count(&self) -> usize {
        self.modules.iter().map(|m| m.transactions.len()).sum()
    }
}

impl ModuleSnapshot {
    pub fn from_module(module: &Module) -> Self {
        Self {
            name: module.name.clone(),
            kind: module.kind,
            transactions: module
                .transactions
                .iter()
                .map(TransactionSnapshot::from_transaction)
                .collect(),
        }
    }
}

impl TransactionSnapshot {
    pub fn from_transaction(txn: &Transaction) -> Self {
        Self {
            kind: txn.kind,
            title: txn.title.clone(),
            amount: txn.amount,
            date: txn.date,
            description: txn.description.clone(),
            currency_symbol: txn.currency_symbol.clone(),
        }
    }
}
