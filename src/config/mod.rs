//! Configuration: types, default paths, XML loading, request validation.

pub mod paths;
pub mod types;
pub mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use validate::validate_request;
pub use xml::load_config;

/// Environment variable naming an explicit config file location.
pub const CONFIG_ENV: &str = "FILE_MOVER_CONFIG";
