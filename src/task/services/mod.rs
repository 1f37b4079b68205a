//! Application services for task creation and lifecycle orchestration.

mod lifecycle;
mod session;
mod stats;
mod wizard;

pub use lifecycle::{TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService};
pub use session::{DraftStore, DraftStoreError};
pub use stats::{
    MemberCompletions, TaskStatsError, TaskStatsResult, TaskStatsService, TeamStats, UserStats,
};
pub use wizard::{
    TaskWizard, WizardError, WizardInput, WizardInputError, WizardResult, WizardState, WizardStep,
};
