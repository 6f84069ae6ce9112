// Shared fixtures for unit tests
pub mod utils;
