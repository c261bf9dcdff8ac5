//! Application glue module
//!
//! Configuration shared by the library and the command-line tool.

mod config;

pub use config::{default_path, Config, ConfigError};
