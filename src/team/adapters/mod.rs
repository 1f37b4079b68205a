//! Adapter implementations of team ports.

pub mod memory;
