//! # cvector-core
//!
//! Correlation vectors: compact, string-encoded causality tokens carried
//! across process and service boundaries to correlate related events.
//!
//! ## Operations
//!
//! - [`CorrelationVector::create`]: fresh random base at extension 0
//! - [`CorrelationVector::extend`]: adopt an incoming value as the base of a new hop
//! - [`CorrelationVector::parse`]: rebuild a vector from its rendered value
//! - [`CorrelationVector::increment`]: advance the current extension (lock-free)
//! - [`spin()`]: insert a time-ordered, low-collision extension level
//!
//! Construction settings (strict validation, default version, spin
//! parameters) are held by a [`VectorFactory`], usually built from a
//! resolved [`CvConfig`].
//!
//! ```
//! use cvector_core::CorrelationVector;
//!
//! let incoming = CorrelationVector::extend("tul4NUsfs9Cl7mOf.1").unwrap().into_value();
//! assert_eq!(incoming.value(), "tul4NUsfs9Cl7mOf.1.0");
//! assert_eq!(incoming.increment(), "tul4NUsfs9Cl7mOf.1.1");
//! ```

pub mod config;
pub mod constants;
pub mod errors;
pub mod factory;
pub mod format;
pub mod spin;
pub mod tracing;
pub mod validation;
pub mod vector;
pub mod version;

// Re-export the most commonly used types at the crate root.
pub use config::CvConfig;
pub use errors::{ConfigError, CvErrorCode, Outcome, VectorError};
pub use factory::VectorFactory;
pub use spin::{spin, spin_with_parameters, SpinEntropy, SpinInterval, SpinParameters, SpinPeriodicity};
pub use vector::CorrelationVector;
pub use version::Version;
