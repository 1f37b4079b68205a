//! In-memory team repository used by the test suite and examples.

mod team;

pub use team::InMemoryTeamRepository;
