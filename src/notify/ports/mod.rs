//! Port contracts for notification delivery and rendering.

pub mod renderer;
pub mod transport;

pub use renderer::{
    AssignmentView, CommentView, DigestTaskLine, DigestTeamSection, DigestView, LimitView,
    NotificationRenderer, ReminderView, RenderError, StatusChangeView,
};
pub use transport::{ChatTransport, TransportError};
