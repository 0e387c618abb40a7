//! Plan service
//!
//! Creates, looks up, and removes budget plans for one owner. Creation
//! validates the full module split before anything is stored, so a failed
//! create leaves the plan collection untouched.

use crate::audit::EntityType;
use crate::error::{MoneyplanError, MoneyplanResult};
use crate::models::{Money, Plan, PlanId};
use crate::services::allocator::{self, ModuleSpec};
use crate::storage::Storage;

/// Service for plan management
pub struct PlanService<'a> {
    storage: &'a Storage,
}

impl<'a> PlanService<'a> {
    /// Create a new plan service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a plan from a validated module split
    pub fn create(
        &self,
        owner: &str,
        name: &str,
        total_balance: Money,
        specs: &[ModuleSpec],
    ) -> MoneyplanResult<Plan> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MoneyplanError::Validation(
                "Plan name cannot be empty".into(),
            ));
        }

        if !total_balance.is_positive() {
            return Err(MoneyplanError::Validation(
                "Total balance must be greater than zero".into(),
            ));
        }

        if self.storage.plans.name_exists(owner, name, None)? {
            return Err(MoneyplanError::Duplicate {
                entity_type: "Plan",
                identifier: name.to_string(),
            });
        }

        allocator::validate_specs(specs)?;

        let modules = allocator::allocate(total_balance, specs);
        let plan = Plan::new(name, total_balance, modules);
        plan.validate()
            .map_err(|e| MoneyplanError::Validation(e.to_string()))?;

        self.storage.plans.upsert(owner, plan.clone())?;
        self.storage.plans.save()?;

        self.storage.log_create(
            EntityType::Plan,
            plan.id.to_string(),
            Some(plan.name.clone()),
            &plan,
        );

        Ok(plan)
    }

    /// Get a plan by ID
    pub fn get(&self, owner: &str, id: PlanId) -> MoneyplanResult<Option<Plan>> {
        self.storage.plans.get(owner, id)
    }

    /// Get a plan by name (case-insensitive)
    pub fn get_by_name(&self, owner: &str, name: &str) -> MoneyplanResult<Option<Plan>> {
        self.storage.plans.get_by_name(owner, name)
    }

    /// Find a plan by name or ID string
    pub fn find(&self, owner: &str, identifier: &str) -> MoneyplanResult<Option<Plan>> {
        // Try by name first
        if let Some(plan) = self.storage.plans.get_by_name(owner, identifier)? {
            return Ok(Some(plan));
        }

        // Try parsing as ID
        if let Ok(id) = identifier.parse::<PlanId>() {
            return self.storage.plans.get(owner, id);
        }

        Ok(None)
    }

    /// Find a plan by name or ID string, or fail with a not-found error
    pub fn require(&self, owner: &str, identifier: &str) -> MoneyplanResult<Plan> {
        self.find(owner, identifier)?
            .ok_or_else(|| MoneyplanError::plan_not_found(identifier))
    }

    /// Get all plans for an owner, in creation order
    pub fn list(&self, owner: &str) -> MoneyplanResult<Vec<Plan>> {
        self.storage.plans.get_all(owner)
    }

    /// Count an owner's plans
    pub fn count(&self, owner: &str) -> MoneyplanResult<usize> {
        self.storage.plans.count(owner)
    }

    /// Delete a plan and everything in it
    pub fn delete(&self, owner: &str, identifier: &str) -> MoneyplanResult<Plan> {
        let plan = self.require(owner, identifier)?;

        self.storage.plans.delete(owner, plan.id)?;
        self.storage.plans.save()?;

        self.storage.log_delete(
            EntityType::Plan,
            plan.id.to_string(),
            Some(plan.name.clone()),
            &plan,
        );

        Ok(plan)
    }

    /// Delete every plan for an owner, returning how many were removed
    pub fn reset(&self, owner: &str) -> MoneyplanResult<usize> {
        let plans = self.storage.plans.get_all(owner)?;

        let removed = self.storage.plans.clear(owner)?;
        self.storage.plans.save()?;

        for plan in &plans {
            self.storage.log_delete(
                EntityType::Plan,
                plan.id.to_string(),
                Some(plan.name.clone()),
                plan,
            );
        }

        Ok(removed)
    }
}
