// Single source of truth for all default values.

use crate::spin::{SpinEntropy, SpinInterval, SpinPeriodicity};
use crate::version::Version;

// --- Validation ---
pub const DEFAULT_STRICT_VALIDATION: bool = false;

// --- Vector ---
pub const DEFAULT_VERSION: Version = Version::V1;

// --- Spin ---
pub const DEFAULT_SPIN_INTERVAL: SpinInterval = SpinInterval::Fine;
pub const DEFAULT_SPIN_PERIODICITY: SpinPeriodicity = SpinPeriodicity::Short;
pub const DEFAULT_SPIN_ENTROPY: SpinEntropy = SpinEntropy::Two;

// --- Files ---
pub const PROJECT_CONFIG_FILENAME: &str = "cvector.toml";
pub const USER_CONFIG_DIR: &str = ".cvector";
pub const USER_CONFIG_FILENAME: &str = "config.toml";
