//! Utility modules.

/// Keeps response bodies and credentials out of logs.
pub(crate) mod log_sanitizer;
