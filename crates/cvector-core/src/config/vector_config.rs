use serde::{Deserialize, Serialize};

use crate::version::Version;

/// Settings for freshly created vectors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
    /// Version used by `VectorFactory::create`. Default: v1.
    pub default_version: Option<Version>,
}
