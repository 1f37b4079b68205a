//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by task services
//! and the reminder scheduler.

pub mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
