//! Top-level cvector configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::de::value::StringDeserializer;
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Serialize};

use super::defaults;
use super::{SpinConfig, ValidationConfig, VectorConfig};
use crate::errors::ConfigError;
use crate::spin::SpinParameters;
use crate::version::Version;

pub const ENV_STRICT_VALIDATION: &str = "CVECTOR_STRICT_VALIDATION";
pub const ENV_DEFAULT_VERSION: &str = "CVECTOR_DEFAULT_VERSION";
pub const ENV_SPIN_INTERVAL: &str = "CVECTOR_SPIN_INTERVAL";
pub const ENV_SPIN_PERIODICITY: &str = "CVECTOR_SPIN_PERIODICITY";
pub const ENV_SPIN_ENTROPY: &str = "CVECTOR_SPIN_ENTROPY";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`CVECTOR_*`)
/// 2. Project config (`cvector.toml` in the given root)
/// 3. User config (`~/.cvector/config.toml`)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CvConfig {
    pub validation: ValidationConfig,
    pub vector: VectorConfig,
    pub spin: SpinConfig,
}

impl CvConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                Self::merge_toml_file(&mut config, &user_config_path)?;
            }
        }

        let project_config_path = root.join(defaults::PROJECT_CONFIG_FILENAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Highest priority: environment variables
        Self::apply_env_overrides(&mut config)?;

        Self::validate(&config)?;
        tracing::debug!(
            strict = config.strict_validation(),
            version = %config.default_version(),
            "resolved cvector config"
        );

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &CvConfig) -> Result<(), ConfigError> {
        let spin = config.spin_parameters();
        if spin.total_bits() == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "spin".to_string(),
                message: "periodicity and entropy cannot both be none".to_string(),
            });
        }
        Ok(())
    }

    pub fn strict_validation(&self) -> bool {
        self.validation
            .strict
            .unwrap_or(defaults::DEFAULT_STRICT_VALIDATION)
    }

    pub fn default_version(&self) -> Version {
        self.vector
            .default_version
            .unwrap_or(defaults::DEFAULT_VERSION)
    }

    pub fn spin_parameters(&self) -> SpinParameters {
        SpinParameters::new(
            self.spin.interval.unwrap_or(defaults::DEFAULT_SPIN_INTERVAL),
            self.spin
                .periodicity
                .unwrap_or(defaults::DEFAULT_SPIN_PERIODICITY),
            self.spin.entropy.unwrap_or(defaults::DEFAULT_SPIN_ENTROPY),
        )
    }

    /// Returns the user config path: `~/.cvector/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| {
            h.join(defaults::USER_CONFIG_DIR)
                .join(defaults::USER_CONFIG_FILENAME)
        })
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut CvConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;

        let file_config: CvConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut CvConfig, other: &CvConfig) {
        if other.validation.strict.is_some() {
            base.validation.strict = other.validation.strict;
        }
        if other.vector.default_version.is_some() {
            base.vector.default_version = other.vector.default_version;
        }
        if other.spin.interval.is_some() {
            base.spin.interval = other.spin.interval;
        }
        if other.spin.periodicity.is_some() {
            base.spin.periodicity = other.spin.periodicity;
        }
        if other.spin.entropy.is_some() {
            base.spin.entropy = other.spin.entropy;
        }
    }

    /// Apply environment variable overrides.
    /// A set but unparseable variable is an error rather than silently ignored.
    fn apply_env_overrides(config: &mut CvConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var(ENV_STRICT_VALIDATION) {
            let strict = val.trim().parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                field: ENV_STRICT_VALIDATION.to_string(),
                message: format!("expected true or false, got {val:?}"),
            })?;
            config.validation.strict = Some(strict);
        }
        if let Ok(val) = std::env::var(ENV_DEFAULT_VERSION) {
            let version = val.parse::<Version>().map_err(|e| ConfigError::InvalidValue {
                field: ENV_DEFAULT_VERSION.to_string(),
                message: e.to_string(),
            })?;
            config.vector.default_version = Some(version);
        }
        if let Ok(val) = std::env::var(ENV_SPIN_INTERVAL) {
            config.spin.interval = Some(parse_keyword(ENV_SPIN_INTERVAL, &val)?);
        }
        if let Ok(val) = std::env::var(ENV_SPIN_PERIODICITY) {
            config.spin.periodicity = Some(parse_keyword(ENV_SPIN_PERIODICITY, &val)?);
        }
        if let Ok(val) = std::env::var(ENV_SPIN_ENTROPY) {
            config.spin.entropy = Some(parse_keyword(ENV_SPIN_ENTROPY, &val)?);
        }
        Ok(())
    }
}

/// Parse a lowercase keyword (e.g. `fine`, `short`) into a serde enum.
fn parse_keyword<T: DeserializeOwned>(field: &str, raw: &str) -> Result<T, ConfigError> {
    let deserializer: StringDeserializer<serde::de::value::Error> =
        raw.trim().to_ascii_lowercase().into_deserializer();
    T::deserialize(deserializer).map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        message: e.to_string(),
    })
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
