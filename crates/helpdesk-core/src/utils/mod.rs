//! Utility functions for string formatting.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{format_age, format_optional, format_timestamp, truncate};
