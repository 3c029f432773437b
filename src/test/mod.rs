// Test utilities shared across unit tests
// Only compiled when running tests

pub mod utils;
