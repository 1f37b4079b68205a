//! Taskherd: team task tracking core.
//!
//! This crate provides the core functionality for a chat-based team task
//! tracker: guided task creation, status lifecycle management, subscription
//! limit enforcement, and deadline reminders with a daily digest.
//!
//! # Architecture
//!
//! Taskherd follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (storage, transport, etc.)
//!
//! Chat transport, persistent storage, and message rendering beyond plain
//! text are external collaborators reached only through port traits; the
//! in-memory adapters shipped here are the reference implementations used by
//! the test suite.
//!
//! # Modules
//!
//! - [`config`]: Subscription tier limits and scheduler knobs
//! - [`team`]: Teams, memberships, roles, and limit enforcement
//! - [`task`]: Task aggregate, creation wizard, and status lifecycle
//! - [`notify`]: Notification rendering and delivery fan-out
//! - [`reminder`]: Deadline sweep, daily digest, and dispatch ledger

pub mod config;
pub mod notify;
pub mod reminder;
pub mod task;
pub mod team;
pub mod testing;
