//! Audit logging for moneyplan
//!
//! Records every committed create, update and delete with before/after
//! values in an append-only log. This is the application's activity trail;
//! a failed audit write never fails the operation that triggered it.
//!
//! # Architecture
//!
//! - `AuditEntry`: a single log entry with timestamp, operation, entity
//!   information, and optional before/after values.
//! - `AuditLogger`: writes entries to the audit log file using a
//!   line-delimited JSON format (JSONL).

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
