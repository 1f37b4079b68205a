//! Scheduling services: the deadline sweep, the daily digest, and the
//! background loops that drive them.

mod runner;
mod scheduler;

pub use runner::{spawn_scheduler, SchedulerHandles};
pub use scheduler::{
    DigestOutcome, ReminderScheduler, SchedulerError, SchedulerResult, SweepOutcome,
};
