//! Adapter implementations of notification ports.

pub mod memory;
pub mod template;

pub use memory::RecordingTransport;
pub use template::TemplateRenderer;
