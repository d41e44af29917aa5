//! Test doubles and fixtures shared by unit tests.

pub mod fake_command_runner;
pub mod fixtures;
pub mod memory_repository;

pub use fake_command_runner::FakeCommandRunner;
