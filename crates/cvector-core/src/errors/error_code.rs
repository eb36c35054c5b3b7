//! CvErrorCode trait for structured error reporting.

/// Gives every error enum a stable code string, suitable for log fields and
/// for callers that forward diagnostics alongside a degraded header.
pub trait CvErrorCode {
    /// Returns the error code string (e.g., "INVALID_FORMAT").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_VERSION: &str = "INVALID_VERSION";
pub const INVALID_FORMAT: &str = "INVALID_FORMAT";
pub const INVALID_EXTENSION: &str = "INVALID_EXTENSION";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
