//! Port contracts for the reminder dispatch ledger.

pub mod ledger;

pub use ledger::{DispatchLedger, DispatchLedgerError, DispatchLedgerResult};
