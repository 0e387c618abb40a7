//! Plan repository for JSON storage
//!
//! Manages loading and saving budget plans to plans.json. Plans are
//! partitioned by owner email so one user's plans are never visible to
//! another. Within a partition, plans keep creation order.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::MoneyplanError;
use crate::models::{Plan, PlanId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable plan data structure, keyed by owner email
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PlanData {
    plans: BTreeMap<String, Vec<Plan>>,
}

/// Repository for plan persistence
pub struct PlanRepository {
    path: PathBuf,
    data: RwLock<HashMap<String, Vec<Plan>>>,
}

impl PlanRepository {
    /// Create a new plan repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load plans from disk
    pub fn load(&self) -> Result<(), MoneyplanError> {
        let file_data: PlanData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for (owner, plans) in file_data.plans {
            data.insert(owner.to_lowercase(), plans);
        }

        Ok(())
    }

    /// Save plans to disk
    pub fn save(&self) -> Result<(), MoneyplanError> {
        let data = self.data.read().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let file_data = PlanData {
            plans: data
                .iter()
                .filter(|(_, plans)| !plans.is_empty())
                .map(|(owner, plans)| (owner.clone(), plans.clone()))
                .collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get all plans for an owner, in creation order
    pub fn get_all(&self, owner: &str) -> Result<Vec<Plan>, MoneyplanError> {
        let data = self.data.read().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&owner.to_lowercase()).cloned().unwrap_or_default())
    }

    /// Get a plan by ID
    pub fn get(&self, owner: &str, id: PlanId) -> Result<Option<Plan>, MoneyplanError> {
        let data = self.data.read().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .get(&owner.to_lowercase())
            .and_then(|plans| plans.iter().find(|p| p.id == id))
            .cloned())
    }

    /// Get a plan by name (case-insensitive)
    pub fn get_by_name(&self, owner: &str, name: &str) -> Result<Option<Plan>, MoneyplanError> {
        let data = self.data.read().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .get(&owner.to_lowercase())
            .and_then(|plans| plans.iter().find(|p| p.name.eq_ignore_ascii_case(name)))
            .cloned())
    }

    /// Insert or update a plan, keeping position on update
    pub fn upsert(&self, owner: &str, plan: Plan) -> Result<(), MoneyplanError> {
        let mut data = self.data.write().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let plans = data.entry(owner.to_lowercase()).or_default();
        match plans.iter_mut().find(|p| p.id == plan.id) {
            Some(existing) => *existing = plan,
            None => plans.push(plan),
        }
        Ok(())
    }

    /// Delete a plan
    pub fn delete(&self, owner: &str, id: PlanId) -> Result<bool, MoneyplanError> {
        let mut data = self.data.write().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let owner_key = owner.to_lowercase();
        let removed = match data.get_mut(&owner_key) {
            Some(plans) => {
                let before = plans.len();
                plans.retain(|p| p.id != id);
                before != plans.len()
            }
            None => false,
        };

        if removed && data.get(&owner_key).is_some_and(|plans| plans.is_empty()) {
            data.remove(&owner_key);
        }

        Ok(removed)
    }

    /// Remove every plan for an owner, returning how many were removed
    pub fn clear(&self, owner: &str) -> Result<usize, MoneyplanError> {
        let mut data = self.data.write().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data
            .remove(&owner.to_lowercase())
            .map(|plans| plans.len())
            .unwrap_or(0))
    }

    /// Check if a plan name is already taken for an owner
    pub fn name_exists(
        &self,
        owner: &str,
        name: &str,
        exclude_id: Option<PlanId>,
    ) -> Result<bool, MoneyplanError> {
        let data = self.data.read().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .get(&owner.to_lowercase())
            .is_some_and(|plans| {
                plans
                    .iter()
                    .any(|p| p.name.eq_ignore_ascii_case(name) && Some(p.id) != exclude_id)
            }))
    }

    /// Count plans for an owner
    pub fn count(&self, owner: &str) -> Result<usize, MoneyplanError> {
        let data = self.data.read().map_err(|e| {
            MoneyplanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&owner.to_lowercase()).map_or(0, |plans| plans.len()))
    }
}
