//! Configuration module
//!
//! Column sorting defaults and logging settings, loaded from TOML.

pub mod config;

pub use config::{ColumnSortingConfig, Config, LoggingConfig};
