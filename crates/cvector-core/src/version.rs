//! Correlation vector protocol versions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{BASE_LENGTH_V1, BASE_LENGTH_V2, MAX_VECTOR_LENGTH_V1, MAX_VECTOR_LENGTH_V2};
use crate::errors::VectorError;

/// Protocol version of a correlation vector. Fixed for the vector's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Version {
    /// 16-character base, 63-byte ceiling.
    #[default]
    V1,
    /// 22-character base, 127-byte ceiling.
    V2,
}

impl Version {
    /// Length of the base identifier generated for this version.
    pub const fn base_length(self) -> usize {
        match self {
            Self::V1 => BASE_LENGTH_V1,
            Self::V2 => BASE_LENGTH_V2,
        }
    }

    /// Maximum rendered length, not counting the terminator.
    pub const fn max_length(self) -> usize {
        match self {
            Self::V1 => MAX_VECTOR_LENGTH_V1,
            Self::V2 => MAX_VECTOR_LENGTH_V2,
        }
    }

    /// Numeric protocol tag (`1` or `2`).
    pub const fn tag(self) -> u8 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
        }
    }
}

impl TryFrom<u8> for Version {
    type Error = VectorError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(Self::V1),
            2 => Ok(Self::V2),
            other => Err(VectorError::InvalidVersion(other.to_string())),
        }
    }
}

impl FromStr for Version {
    type Err = VectorError;

    /// Accepts `v1`, `V1`, `1` and the same for version 2.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);
        match digits {
            "1" => Ok(Self::V1),
            "2" => Ok(Self::V2),
            _ => Err(VectorError::InvalidVersion(s.to_string())),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.tag())
    }
}
