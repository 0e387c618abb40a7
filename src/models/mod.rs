//! Core data models for moneyplan
//!
//! This module contains all the data structures that represent the planning
//! domain: users, plans, modules, transactions, money and percentages.

pub mod currency;
pub mod ids;
pub mod module;
pub mod money;
pub mod percent;
pub mod plan;
pub mod transaction;
pub mod user;

pub use currency::Currency;
pub use ids::{ModuleId, PlanId, TransactionId};
pub use module::{default_color, is_valid_color, Module, ModuleKind, SavingGoal, DEFAULT_PALETTE};
pub use money::Money;
pub use percent::Percent;
pub use plan::Plan;
pub use transaction::{Transaction, TransactionKind};
pub use user::User;
