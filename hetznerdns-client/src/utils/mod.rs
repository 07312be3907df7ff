//! Utility modules.

/// Bounded, single-line rendering of response bodies for logs and errors.
pub mod log_sanitizer;
