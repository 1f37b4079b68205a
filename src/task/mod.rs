//! Task lifecycle management for Taskherd.
//!
//! This module implements the task aggregate, the multi-step creation
//! wizard, and the status transition machine. Tasks are created only by the
//! wizard's confirmation step, mutated by status transitions and field
//! edits, and removed only by an explicit delete that cascades comments and
//! reminder dispatch records. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
