//! Plan creation wizard
//!
//! Two-step draft for building a plan: step 1 fixes the name, total
//! balance, and module count; step 2 collects the module split. A failed
//! step leaves the draft where it was so the caller can retry the same
//! step, and nothing is stored until commit.

use crate::error::{MoneyplanError, MoneyplanResult};
use crate::models::{Money, Plan};
use crate::services::allocator::{self, ModuleSpec, MAX_MODULES};
use crate::services::PlanService;
use crate::storage::Storage;

#[derive(Debug, Clone)]
struct Step1 {
    name: String,
    total_balance: Money,
    module_count: usize,
}

/// Draft state for the two-step plan creation flow
#[derive(Debug, Default)]
pub struct PlanWizard {
    step1: Option<Step1>,
    specs: Option<Vec<ModuleSpec>>,
}

impl PlanWizard {
    /// Start an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Step 1: name, total balance, and how many modules to split into
    ///
    /// Re-running step 1 discards any step 2 input, since the module
    /// count may have changed.
    pub fn step1(
        &mut self,
        name: &str,
        total_balance: Money,
        module_count: usize,
    ) -> MoneyplanResult<()> {
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

        if module_count == 0 || module_count > MAX_MODULES {
            return Err(MoneyplanError::Validation(format!(
                "A plan needs between 1 and {} modules (got {})",
                MAX_MODULES, module_count
            )));
        }

        self.step1 = Some(Step1 {
            name: name.to_string(),
            total_balance,
            module_count,
        });
        self.specs = None;
        Ok(())
    }

    /// Step 2: the module split, which must match the step 1 count and
    /// sum to 100%
    pub fn step2(&mut self, specs: Vec<ModuleSpec>) -> MoneyplanResult<()> {
        let step1 = self.step1.as_ref().ok_or_else(|| {
            MoneyplanError::Validation("Set the plan name and total balance first".into())
        })?;

        if specs.len() != step1.module_count {
            return Err(MoneyplanError::Validation(format!(
                "Expected {} modules, got {}",
                step1.module_count,
                specs.len()
            )));
        }

        allocator::validate_specs(&specs)?;

        self.specs = Some(specs);
        Ok(())
    }

    /// Whether both steps have passed validation
    pub fn is_ready(&self) -> bool {
        self.step1.is_some() && self.specs.is_some()
    }

    /// The plan name fixed in step 1, if any
    pub fn plan_name(&self) -> Option<&str> {
        self.step1.as_ref().map(|s| s.name.as_str())
    }

    /// The total balance fixed in step 1, if any
    pub fn total_balance(&self) -> Option<Money> {
        self.step1.as_ref().map(|s| s.total_balance)
    }

    /// The module count fixed in step 1, if any
    pub fn module_count(&self) -> Option<usize> {
        self.step1.as_ref().map(|s| s.module_count)
    }

    /// Create the plan from the completed draft
    ///
    /// This is the only point where anything is stored.
    pub fn commit(&self, storage: &Storage, owner: &str) -> MoneyplanResult<Plan> {
        let (step1, specs) = match (&self.step1, &self.specs) {
            (Some(step1), Some(specs)) => (step1, specs),
            _ => {
                return Err(MoneyplanError::Validation(
                    "Wizard is not complete".into(),
                ))
            }
        };

        PlanService::new(storage).create(owner, &step1.name, step1.total_balance, specs)
    }
}
