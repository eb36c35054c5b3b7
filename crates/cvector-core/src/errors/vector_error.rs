//! Correlation vector construction errors.

use super::error_code::{self, CvErrorCode};

/// Errors raised while constructing a correlation vector.
///
/// Increment and spin never produce these: hitting a capacity limit freezes
/// the vector instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VectorError {
    #[error("invalid correlation vector version: {0}")]
    InvalidVersion(String),

    #[error("invalid correlation vector {vector:?}: {reason}")]
    InvalidFormat { vector: String, reason: String },

    #[error("invalid correlation vector extension {extension:?} in {vector:?}")]
    InvalidExtension { vector: String, extension: String },
}

impl VectorError {
    pub(crate) fn invalid_format(vector: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            vector: vector.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_extension(vector: &str, extension: &str) -> Self {
        Self::InvalidExtension {
            vector: vector.to_string(),
            extension: extension.to_string(),
        }
    }
}

impl CvErrorCode for VectorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidVersion(_) => error_code::INVALID_VERSION,
            Self::InvalidFormat { .. } => error_code::INVALID_FORMAT,
            Self::InvalidExtension { .. } => error_code::INVALID_EXTENSION,
        }
    }
}
