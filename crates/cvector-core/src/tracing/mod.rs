//! Observability for cvector.
//! `tracing` crate with `EnvFilter`, configured through `CVECTOR_LOG`.

pub mod setup;

pub use setup::init_tracing;
