//! Construction settings for correlation vectors.
//!
//! A factory carries the knobs that would otherwise be process-wide state:
//! whether incoming values are strictly validated, which version fresh
//! vectors use, and the spin parameters. Changing a factory only affects
//! vectors it constructs afterwards.

use crate::config::CvConfig;
use crate::errors::{Outcome, VectorError};
use crate::spin::{self, SpinParameters};
use crate::vector::CorrelationVector;
use crate::version::Version;

/// Builds correlation vectors with a fixed set of construction settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VectorFactory {
    strict_validation: bool,
    default_version: Version,
    spin_parameters: SpinParameters,
}

impl VectorFactory {
    /// Lenient factory producing V1 vectors with default spin parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory that validates every incoming value.
    pub fn strict() -> Self {
        Self::new().with_strict_validation(true)
    }

    /// Factory built from a resolved configuration.
    pub fn from_config(config: &CvConfig) -> Self {
        Self {
            strict_validation: config.strict_validation(),
            default_version: config.default_version(),
            spin_parameters: config.spin_parameters(),
        }
    }

    pub fn with_strict_validation(mut self, strict: bool) -> Self {
        self.strict_validation = strict;
        self
    }

    pub fn with_default_version(mut self, version: Version) -> Self {
        self.default_version = version;
        self
    }

    pub fn with_spin_parameters(mut self, parameters: SpinParameters) -> Self {
        self.spin_parameters = parameters;
        self
    }

    pub fn strict_validation(&self) -> bool {
        self.strict_validation
    }

    pub fn default_version(&self) -> Version {
        self.default_version
    }

    pub fn spin_parameters(&self) -> SpinParameters {
        self.spin_parameters
    }

    /// Create a fresh vector of the default version.
    pub fn create(&self) -> CorrelationVector {
        CorrelationVector::with_version(self.default_version)
    }

    /// Start a new hop from an incoming value.
    ///
    /// With strict validation a malformed value is rejected outright;
    /// otherwise a version inference failure is reported in the outcome.
    pub fn extend(&self, vector: &str) -> Result<Outcome<CorrelationVector>, VectorError> {
        CorrelationVector::extend_with(vector, self.strict_validation)
    }

    /// Rebuild a vector from its rendered value. Never strictly validated.
    pub fn parse(&self, vector: &str) -> Result<Outcome<CorrelationVector>, VectorError> {
        CorrelationVector::parse(vector)
    }

    /// Spin an incoming value with this factory's spin parameters.
    pub fn spin(&self, vector: &str) -> Result<Outcome<CorrelationVector>, VectorError> {
        spin::spin_vector(vector, &self.spin_parameters, self.strict_validation)
    }
}
