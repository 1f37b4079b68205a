//! In-memory dispatch ledger used by the test suite and examples.

mod ledger;

pub use ledger::InMemoryDispatchLedger;
