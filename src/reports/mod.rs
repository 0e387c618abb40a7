//! Reports module for Moneyplan
//!
//! Provides read-only views over plan data: spending trends over a
//! rolling window and flattened cross-plan activity listings.

pub mod activity;
pub mod trend;

pub use activity::{ActivityEntry, ActivityQuery, ActivityReport};
pub use trend::{TrendPeriod, TrendPoint, TrendReport};
