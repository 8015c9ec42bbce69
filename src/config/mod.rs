//! Run-time solver configuration.
//!
//! Provides a typed key-value parameter store loaded from JSON input files:
//! - [`ParameterValue`]: tagged union over the scalar types the configuration
//!   format supports
//! - [`ParameterRegistry`]: explicitly constructed registry with
//!   JSON-pointer style keys and default-value fallback getters

mod registry;
mod value;

pub use registry::{ConfigError, ParameterRegistry};
pub use value::ParameterValue;
