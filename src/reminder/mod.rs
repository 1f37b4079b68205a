//! Deadline reminders and the daily digest.
//!
//! A periodic sweep matches task deadlines against three sliding windows
//! and notifies assignees at most once per (task, window) pair, using an
//! insert-only dispatch ledger that survives restarts. A separate daily
//! activity sends each user a digest of today's and overdue work. The
//! module follows hexagonal architecture:
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
