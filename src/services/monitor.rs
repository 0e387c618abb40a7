//! Goal and threshold monitor
//!
//! Derives read-only status from ledger data: saving-goal progress,
//! emergency-threshold breaches, and allocation drift left behind by
//! structural edits. Also owns the goal and threshold setters, which are
//! the only mutations here and never move money.

use rust_decimal::Decimal;

use crate::audit::EntityType;
use crate::error::{MoneyplanError, MoneyplanResult};
use crate::models::{Module, ModuleId, ModuleKind, Money, Percent, Plan, PlanId, SavingGoal};
use crate::services::PlanService;
use crate::storage::Storage;

/// Service for goal tracking and plan health
pub struct GoalMonitor<'a> {
    storage: &'a Storage,
}

/// Progress toward a saving goal
#[derive(Debug, Clone)]
pub struct SavingProgress {
    pub goal: SavingGoal,
    /// Goal resolved to a concrete amount against the plan total
    pub target: Money,
    /// Percent of target reached, unbounded above 100. None when the
    /// target is not positive.
    pub percent_complete: Option<Decimal>,
}

/// Emergency threshold state
#[derive(Debug, Clone)]
pub struct EmergencyStatus {
    pub threshold: Money,
    /// Alert condition, not an error
    pub below_threshold: bool,
    pub shortfall: Money,
}

/// Derived status for one module
#[derive(Debug, Clone)]
pub struct ModuleStatus {
    pub module_id: ModuleId,
    pub name: String,
    pub kind: ModuleKind,
    pub balance: Money,
    pub percentage: Percent,
    /// Actual share of the plan total held right now, as a percentage
    pub share_of_plan: Option<Decimal>,
    pub saving: Option<SavingProgress>,
    pub emergency: Option<EmergencyStatus>,
}

/// Derived status for a whole plan
#[derive(Debug, Clone)]
pub struct PlanStatus {
    pub plan_id: PlanId,
    pub name: String,
    pub total_balance: Money,
    pub percentage_total: Decimal,
    /// Set when module percentages no longer sum to 100
    pub allocation_drift: bool,
    pub modules: Vec<ModuleStatus>,
}

impl<'a> GoalMonitor<'a> {
    /// Create a new goal monitor
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Derive the status of every module in a plan
    pub fn plan_status(&self, plan: &Plan) -> PlanStatus {
        PlanStatus {
            plan_id: plan.id,
            name: plan.name.clone(),
            total_balance: plan.total_balance,
            percentage_total: plan.percentage_total(),
            allocation_drift: plan.has_allocation_drift(),
            modules: plan
                .modules
                .iter()
                .map(|m| self.module_status(plan, m))
                .collect(),
        }
    }

    /// Derive the status of one module
    pub fn module_status(&self, plan: &Plan, module: &Module) -> ModuleStatus {
        let share_of_plan = if plan.total_balance.is_positive() {
            Some(
                module.balance.amount() / plan.total_balance.amount() * Decimal::ONE_HUNDRED,
            )
        } else {
            None
        };

        let saving = module.saving_goal.as_ref().map(|goal| {
            let target = goal.target_amount(plan.total_balance);
            let percent_complete = if target.is_positive() {
                Some(module.balance.amount() / target.amount() * Decimal::ONE_HUNDRED)
            } else {
                None
            };
            SavingProgress {
                goal: goal.clone(),
                target,
                percent_complete,
            }
        });

        let emergency = module.emergency_threshold.map(|threshold| {
            let below_threshold = module.balance < threshold;
            let shortfall = if below_threshold {
                threshold - module.balance
            } else {
                Money::zero()
            };
            EmergencyStatus {
                threshold,
                below_threshold,
                shortfall,
            }
        });

        ModuleStatus {
            module_id: module.id,
            name: module.name.clone(),
            kind: module.kind,
            balance: module.balance,
            percentage: module.percentage,
            share_of_plan,
            saving,
            emergency,
        }
    }

    /// Set a saving goal on a saving-type module
    pub fn set_saving_goal(
        &self,
        owner: &str,
        plan_identifier: &str,
        module_identifier: &str,
        goal: SavingGoal,
    ) -> MoneyplanResult<Plan> {
        if let SavingGoal::Amount(amount) = &goal {
            if amount.is_negative() {
                return Err(MoneyplanError::Validation(
                    "Saving goal cannot be negative".into(),
                ));
            }
        }

        self.update_module(owner, plan_identifier, module_identifier, |module| {
            if module.kind != ModuleKind::Saving {
                return Err(MoneyplanError::Validation(format!(
                    "Saving goals can only be set on saving modules ('{}' is {})",
                    module.name, module.kind
                )));
            }
            let detail = match &module.saving_goal {
                Some(old) => format!("goal: {} -> {}", old, goal),
                None => format!("goal: none -> {}", goal),
            };
            module.set_saving_goal(goal.clone());
            Ok(detail)
        })
    }

    /// Remove a module's saving goal
    pub fn clear_saving_goal(
        &self,
        owner: &str,
        plan_identifier: &str,
        module_identifier: &str,
    ) -> MoneyplanResult<Plan> {
        self.update_module(owner, plan_identifier, module_identifier, |module| {
            let detail = match &module.saving_goal {
                Some(old) => format!("goal: {} -> none", old),
                None => "goal: none -> none".to_string(),
            };
            module.clear_saving_goal();
            Ok(detail)
        })
    }

    /// Set an emergency threshold on an emergency-type module
    pub fn set_emergency_threshold(
        &self,
        owner: &str,
        plan_identifier: &str,
        module_identifier: &str,
        threshold: Money,
    ) -> MoneyplanResult<Plan> {
        if threshold.is_negative() {
            return Err(MoneyplanError::Validation(
                "Emergency threshold cannot be negative".into(),
            ));
        }

        self.update_module(owner, plan_identifier, module_identifier, |module| {
            if module.kind != ModuleKind::Emergency {
                return Err(MoneyplanError::Validation(format!(
                    "Emergency thresholds can only be set on emergency modules ('{}' is {})",
                    module.name, module.kind
                )));
            }
            let detail = match &module.emergency_threshold {
                Some(old) => format!("threshold: {} -> {}", old, threshold),
                None => format!("threshold: none -> {}", threshold),
            };
            module.set_emergency_threshold(threshold);
            Ok(detail)
        })
    }

    /// Remove a module's emergency threshold
    pub fn clear_emergency_threshold(
        &self,
        owner: &str,
        plan_identifier: &str,
        module_identifier: &str,
    ) -> MoneyplanResult<Plan> {
        self.update_module(owner, plan_identifier, module_identifier, |module| {
            let detail = match &module.emergency_threshold {
                Some(old) => format!("threshold: {} -> none", old),
                None => "threshold: none -> none".to_string(),
            };
            module.clear_emergency_threshold();
            Ok(detail)
        })
    }

    /// Apply a goal/threshold change to one module and persist the plan
    fn update_module<F>(
        &self,
        owner: &str,
        plan_identifier: &str,
        module_identifier: &str,
        change: F,
    ) -> MoneyplanResult<Plan>
    where
        F: FnOnce(&mut Module) -> MoneyplanResult<String>,
    {
        let mut plan = PlanService::new(self.storage).require(owner, plan_identifier)?;

        let module_id = plan
            .find_module(module_identifier)
            .ok_or_else(|| MoneyplanError::module_not_found(module_identifier))?
            .id;

        let module = plan
            .module_mut(module_id)
            .ok_or_else(|| MoneyplanError::module_not_found(module_identifier))?;
        let before = module.clone();

        let detail = change(module)?;
        let after = module.clone();
        plan.touch();

        self.storage.plans.upsert(owner, plan.clone())?;
        self.storage.plans.save()?;

        self.storage.log_update(
            EntityType::Module,
            after.id.to_string(),
            Some(after.name.clone()),
            &before,
            &after,
            Some(detail),
        );

        Ok(plan)
    }
}
