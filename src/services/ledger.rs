//! Module ledger service
//!
//! Applies transactions to a single module and keeps the plan total
//! moving in the same step, so the plan never persists with its total out
//! of sync with the module balances. Every operation validates before it
//! mutates; a rejected operation leaves the plan exactly as it was.
//!
//! Income uses the single-module policy: only the targeted module and the
//! plan total are credited. Expenses are single-module by definition.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::audit::EntityType;
use crate::error::{MoneyplanError, MoneyplanResult};
use crate::models::{
    is_valid_color, ModuleId, Money, Percent, Plan, Transaction, TransactionKind,
};
use crate::services::PlanService;
use crate::storage::Storage;

/// Service for recording transactions and restructuring modules
pub struct LedgerService<'a> {
    storage: &'a Storage,
}

/// Outcome of a recorded transaction, with the fields the caller usually
/// wants to show
#[derive(Debug, Clone)]
pub struct RecordedTransaction {
    pub plan: Plan,
    pub module_id: ModuleId,
    pub module_name: String,
    pub module_balance: Money,
    pub transaction: Transaction,
}

impl<'a> LedgerService<'a> {
    /// Create a new ledger service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record an expense against a module
    pub fn record_expense(
        &self,
        owner: &str,
        plan_identifier: &str,
        module_identifier: &str,
        title: &str,
        amount: Money,
        date: NaiveDate,
        description: Option<&str>,
    ) -> MoneyplanResult<RecordedTransaction> {
        self.record(
            owner,
            plan_identifier,
            module_identifier,
            TransactionKind::Expense,
            title,
            amount,
            date,
            description,
        )
    }

    /// Record income into a module
    pub fn record_income(
        &self,
        owner: &str,
        plan_identifier: &str,
        module_identifier: &str,
        title: &str,
        amount: Money,
        date: NaiveDate,
        description: Option<&str>,
    ) -> MoneyplanResult<RecordedTransaction> {
        self.record(
            owner,
            plan_identifier,
            module_identifier,
            TransactionKind::Income,
            title,
            amount,
            date,
            description,
        )
    }

    /// Record a transaction against exactly one module
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &self,
        owner: &str,
        plan_identifier: &str,
        module_identifier: &str,
        kind: TransactionKind,
        title: &str,
        amount: Money,
        date: NaiveDate,
        description: Option<&str>,
    ) -> MoneyplanResult<RecordedTransaction> {
        if !amount.is_positive() {
            return Err(MoneyplanError::Validation(
                "Amount must be greater than zero".into(),
            ));
        }

        let user = self
            .storage
            .users
            .get(owner)?
            .ok_or_else(|| MoneyplanError::user_not_found(owner))?;

        let mut plan = PlanService::new(self.storage).require(owner, plan_identifier)?;

        // Resolve the target and check funds before touching anything
        let (module_id, module_name, module_balance) = {
            let module = plan
                .find_module(module_identifier)
                .ok_or_else(|| MoneyplanError::module_not_found(module_identifier))?;
            (module.id, module.name.clone(), module.balance)
        };

        if kind == TransactionKind::Expense && amount > module_balance {
            return Err(MoneyplanError::InsufficientFunds {
                module: module_name,
                needed: amount,
                available: module_balance,
            });
        }

        let transaction = match description {
            Some(desc) => Transaction::with_description(
                kind,
                title,
                amount,
                date,
                user.currency_symbol(),
                desc,
            ),
            None => Transaction::new(kind, title, amount, date, user.currency_symbol()),
        };
        transaction
            .validate()
            .map_err(|e| MoneyplanError::Validation(e.to_string()))?;

        let module = plan
            .module_mut(module_id)
            .ok_or_else(|| MoneyplanError::module_not_found(module_identifier))?;

        match kind {
            TransactionKind::Expense => module.balance -= amount,
            TransactionKind::Income => module.balance += amount,
        }
        module.prepend_transaction(transaction.clone());
        let module_balance = module.balance;

        match kind {
            TransactionKind::Expense => plan.total_balance -= amount,
            TransactionKind::Income => plan.total_balance += amount,
        }
        plan.touch();

        self.storage.plans.upsert(owner, plan.clone())?;
        self.storage.plans.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            transaction.id.to_string(),
            Some(format!("{} / {}", plan.name, module_name)),
            &transaction,
        );

        Ok(RecordedTransaction {
            plan,
            module_id,
            module_name,
            module_balance,
            transaction,
        })
    }

    /// Edit a module's name, percentage, or color
    ///
    /// A percentage change moves `total * (new - old) / 100` into or out of
    /// the module, and the plan total with it. Balance drift from earlier
    /// transactions is preserved; nothing is recomputed from scratch.
    pub fn edit_module(
        &self,
        owner: &str,
        plan_identifier: &str,
        module_identifier: &str,
        new_name: Option<&str>,
        new_percentage: Option<Percent>,
        new_color: Option<&str>,
    ) -> MoneyplanResult<Plan> {
        if new_name.is_none() && new_percentage.is_none() && new_color.is_none() {
            return Err(MoneyplanError::Validation("No changes given".into()));
        }

        let mut plan = PlanService::new(self.storage).require(owner, plan_identifier)?;

        let before = plan
            .find_module(module_identifier)
            .ok_or_else(|| MoneyplanError::module_not_found(module_identifier))?
            .clone();

        if let Some(name) = new_name {
            let name = name.trim();
            if name.is_empty() {
                return Err(MoneyplanError::Validation(
                    "Module name cannot be empty".into(),
                ));
            }
            let clash = plan
                .modules
                .iter()
                .any(|m| m.id != before.id && m.name.eq_ignore_ascii_case(name));
            if clash {
                return Err(MoneyplanError::Duplicate {
                    entity_type: "Module",
                    identifier: name.to_string(),
                });
            }
        }

        if let Some(color) = new_color {
            if !is_valid_color(color) {
                return Err(MoneyplanError::Validation(format!(
                    "Invalid color '{}': expected #RRGGBB",
                    color
                )));
            }
        }

        // The allocation delta is funded by the plan, so the plan total
        // moves by the same amount as the module balance
        let mut delta = Money::zero();
        if let Some(new_pct) = new_percentage {
            delta = Money::new(
                plan.total_balance.amount() * (new_pct.value() - before.percentage.value())
                    / Decimal::ONE_HUNDRED,
            );
            if (before.balance + delta).is_negative() {
                return Err(MoneyplanError::InsufficientFunds {
                    module: before.name.clone(),
                    needed: delta.abs(),
                    available: before.balance,
                });
            }
        }

        let module = plan
            .module_mut(before.id)
            .ok_or_else(|| MoneyplanError::module_not_found(module_identifier))?;

        if let Some(name) = new_name {
            module.rename(name.trim());
        }
        if let Some(color) = new_color {
            module.set_color(color);
        }
        if let Some(new_pct) = new_percentage {
            module.set_percentage(new_pct);
            module.balance += delta;
        }
        let after = module.clone();
        after
            .validate()
            .map_err(|e| MoneyplanError::Validation(e.to_string()))?;

        plan.total_balance += delta;
        plan.touch();

        self.storage.plans.upsert(owner, plan.clone())?;
        self.storage.plans.save()?;

        let mut changes = Vec::new();
        if before.name != after.name {
            changes.push(format!("name: {} -> {}", before.name, after.name));
        }
        if before.percentage != after.percentage {
            changes.push(format!(
                "percentage: {} -> {}, balance: {} -> {}",
                before.percentage, after.percentage, before.balance, after.balance
            ));
        }
        if before.color != after.color {
            changes.push(format!("color: {} -> {}", before.color, after.color));
        }

        self.storage.log_update(
            EntityType::Module,
            after.id.to_string(),
            Some(after.name.clone()),
            &before,
            &after,
            Some(changes.join(", ")),
        );

        Ok(plan)
    }

    /// Delete a module, withdrawing its balance from the plan total
    ///
    /// The module's funds leave the plan; they are not redistributed to
    /// the remaining modules.
    pub fn delete_module(
        &self,
        owner: &str,
        plan_identifier: &str,
        module_identifier: &str,
    ) -> MoneyplanResult<Plan> {
        let mut plan = PlanService::new(self.storage).require(owner, plan_identifier)?;

        let module = plan
            .find_module(module_identifier)
            .ok_or_else(|| MoneyplanError::module_not_found(module_identifier))?
            .clone();

        plan.modules.retain(|m| m.id != module.id);
        plan.total_balance -= module.balance;
        plan.touch();

        self.storage.plans.upsert(owner, plan.clone())?;
        self.storage.plans.save()?;

        self.storage.log_delete(
            EntityType::Module,
            module.id.to_string(),
            Some(module.name.clone()),
            &module,
        );

        Ok(plan)
    }
}
