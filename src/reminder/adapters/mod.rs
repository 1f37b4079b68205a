//! Adapter implementations of reminder ports.

pub mod memory;

pub use memory::InMemoryDispatchLedger;
