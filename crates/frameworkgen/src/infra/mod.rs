//! Infrastructure adapters for configuration, source files and logging.

pub mod config;
pub mod logging;
pub mod sources;
