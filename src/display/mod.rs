//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display.

pub mod plan;

pub use plan::{format_plan_details, format_plan_list};
