//! A constructed value paired with a non-fatal error.

use super::VectorError;

/// Result of a lenient construction.
///
/// A malformed incoming header should degrade the correlation chain, not
/// abort the caller's request, so version inference failures are reported
/// here next to a usable value instead of through `Err`.
#[derive(Debug)]
pub struct Outcome<T> {
    /// The constructed value.
    pub value: T,
    /// Non-fatal error recorded during construction.
    pub error: Option<VectorError>,
}

impl<T> Outcome<T> {
    /// A result with no recorded error.
    pub fn clean(value: T) -> Self {
        Self { value, error: None }
    }

    /// A result carrying an optional non-fatal error.
    pub fn with_error(value: T, error: Option<VectorError>) -> Self {
        Self { value, error }
    }

    /// Returns true if construction recorded no error.
    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }

    /// Discard the error and keep the value.
    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, Option<VectorError>) {
        (self.value, self.error)
    }

    /// Treat the non-fatal error as fatal.
    pub fn into_strict(self) -> Result<T, VectorError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.value),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            error: self.error,
        }
    }
}
