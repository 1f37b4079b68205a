//! Adapter implementations of task ports.

pub mod memory;
