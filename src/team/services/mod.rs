//! Application services for team management and limit enforcement.

mod limits;
mod membership;

pub use limits::{LimitDecision, LimitGuard, LimitGuardError, LimitGuardResult};
pub use membership::{TeamService, TeamServiceError, TeamServiceResult};
