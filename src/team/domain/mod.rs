//! Domain model for teams, memberships, and subscription tiers.
//!
//! Teams group users, tasks, and a subscription tier. Role checks are a
//! closed enumeration with capability methods rather than string matching,
//! so privileged actions are gated in exactly one place.

mod error;
mod ids;
mod membership;
mod team;
mod tier;

pub use error::{ParseRoleError, ParseTierError, TeamDomainError};
pub use ids::{InviteCode, TeamId, UserId};
pub use membership::{Membership, MembershipListing, Role};
pub use team::{PersistedTeamData, Team};
pub use tier::SubscriptionTier;
