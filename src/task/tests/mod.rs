//! Unit tests for the task module.

mod domain_tests;
mod lifecycle_tests;
