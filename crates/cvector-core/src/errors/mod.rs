//! Error handling for cvector.
//! One error enum per concern, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod outcome;
pub mod vector_error;

pub use config_error::ConfigError;
pub use error_code::CvErrorCode;
pub use outcome::Outcome;
pub use vector_error::VectorError;
