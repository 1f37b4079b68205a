//! Domain model for reminder windows.

mod window;

pub use window::{ParseWindowKindError, WindowKind};
