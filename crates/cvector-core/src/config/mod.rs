//! Configuration system for cvector.
//! TOML-based, layered resolution: env > project > user > defaults.

pub mod cvector_config;
pub mod defaults;
pub mod spin_config;
pub mod validation_config;
pub mod vector_config;

pub use cvector_config::CvConfig;
pub use spin_config::SpinConfig;
pub use validation_config::ValidationConfig;
pub use vector_config::VectorConfig;
