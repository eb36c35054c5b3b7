use serde::{Deserialize, Serialize};

/// Validation settings applied to incoming values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Run the strict grammar check on every extend and spin. Default: false.
    pub strict: Option<bool>,
}
