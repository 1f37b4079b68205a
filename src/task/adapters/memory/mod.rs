//! In-memory task repository used by the test suite and examples.

mod task;

pub use task::InMemoryTaskRepository;
