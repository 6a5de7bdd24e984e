//! Configuration for the pipeline, the overlay client and the local
//! summarization service.
//!
//! `LensConfig` is assembled either through the fluent builder or from the
//! process environment (`LensConfig::from_env`). Both paths validate through
//! the same `build()`.

pub mod builder;
pub mod getters;
pub mod types;

pub use builder::LensConfigBuilder;
pub use types::{ConfigError, LensConfig};
