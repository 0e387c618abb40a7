//! Service layer for Moneyplan
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, computed fields, and cross-entity operations.

pub mod allocator;
pub mod ledger;
pub mod monitor;
pub mod plan;
pub mod session;
pub mod wizard;

pub use allocator::{ModuleSpec, MAX_MODULES};
pub use ledger::{LedgerService, RecordedTransaction};
pub use monitor::{GoalMonitor, ModuleStatus, PlanStatus};
pub use plan::PlanService;
pub use session::SessionService;
pub use wizard::PlanWizard;
