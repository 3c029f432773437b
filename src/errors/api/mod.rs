// API-facing error types
pub mod api_error;

#[cfg(test)]
mod api_error_test;

pub use api_error::{ACCESS_DENIED_TITLE, ApiError, PAGE_UNAVAILABLE_TITLE};
