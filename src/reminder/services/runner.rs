//! Background loops driving the scheduler.
//!
//! Two detached tokio tasks: a fixed-cadence sweep loop and a daily digest
//! loop that sleeps until the next configured trigger time. Run failures
//! are logged and the loop carries on; the next tick retries.

use super::scheduler::ReminderScheduler;
use crate::config::{ConfigError, SchedulerConfig};
use crate::reminder::ports::DispatchLedger;
use crate::task::ports::TaskRepository;
use crate::team::ports::TeamRepository;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Join handles for the two scheduler loops.
///
/// Dropping the handles detaches the loops; abort them to stop.
#[derive(Debug)]
pub struct SchedulerHandles {
    /// The deadline sweep loop.
    pub sweep: JoinHandle<()>,
    /// The daily digest loop.
    pub digest: JoinHandle<()>,
}

impl SchedulerHandles {
    /// Aborts both loops.
    pub fn abort(&self) {
        self.sweep.abort();
        self.digest.abort();
    }
}

/// Spawns the sweep and digest loops on the current tokio runtime.
///
/// # Errors
///
/// Returns a [`ConfigError`] when the scheduler configuration fails
/// validation; nothing is spawned in that case.
pub fn spawn_scheduler<TR, TA, L, C>(
    scheduler: Arc<ReminderScheduler<TR, TA, L, C>>,
    config: SchedulerConfig,
) -> Result<SchedulerHandles, ConfigError>
where
    TR: TeamRepository + 'static,
    TA: TaskRepository + 'static,
    L: DispatchLedger + 'static,
    C: Clock + Send + Sync + 'static,
{
    config.validate()?;
    let trigger = NaiveTime::from_hms_opt(config.digest_hour, config.digest_minute, 0).ok_or(
        ConfigError::InvalidDigestTime {
            hour: config.digest_hour,
            minute: config.digest_minute,
        },
    )?;

    let sweep = tokio::spawn(sweep_loop(Arc::clone(&scheduler), config));
    let digest = tokio::spawn(digest_loop(scheduler, trigger));
    Ok(SchedulerHandles { sweep, digest })
}

async fn sweep_loop<TR, TA, L, C>(
    scheduler: Arc<ReminderScheduler<TR, TA, L, C>>,
    config: SchedulerConfig,
) where
    TR: TeamRepository,
    TA: TaskRepository,
    L: DispatchLedger,
    C: Clock + Send + Sync,
{
    let period = std::time::Duration::from_secs(
        config.sweep_interval_minutes.unsigned_abs().saturating_mul(60),
    );
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        if let Err(error) = scheduler.run_sweep().await {
            tracing::error!(%error, "deadline sweep aborted");
        }
    }
}

async fn digest_loop<TR, TA, L, C>(
    scheduler: Arc<ReminderScheduler<TR, TA, L, C>>,
    trigger: NaiveTime,
) where
    TR: TeamRepository,
    TA: TaskRepository,
    L: DispatchLedger,
    C: Clock + Send + Sync,
{
    loop {
        let now = Utc::now();
        let next = next_digest_instant(now, trigger);
        let wait = (next - now).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;
        if let Err(error) = scheduler.run_digest().await {
            tracing::error!(%error, "daily digest aborted");
        }
    }
}

/// The next instant at or after `now` matching the trigger wall-clock
/// time, never `now` itself.
fn next_digest_instant(now: DateTime<Utc>, trigger: NaiveTime) -> DateTime<Utc> {
    let today = now.date_naive().and_time(trigger).and_utc();
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}
