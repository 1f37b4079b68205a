//! Port contracts for team and membership persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by team services.

pub mod counts;
pub mod repository;

pub use counts::{TaskCountError, TaskCounter};
pub use repository::{TeamRepository, TeamRepositoryError, TeamRepositoryResult};
