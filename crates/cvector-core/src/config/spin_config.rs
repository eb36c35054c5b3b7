use serde::{Deserialize, Serialize};

use crate::spin::{SpinEntropy, SpinInterval, SpinPeriodicity};

/// Spin sub-clock settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    /// Tick resolution. Default: fine.
    pub interval: Option<SpinInterval>,
    /// Time bits kept before wrapping. Default: short.
    pub periodicity: Option<SpinPeriodicity>,
    /// Random bytes per spin value. Default: two.
    pub entropy: Option<SpinEntropy>,
}
