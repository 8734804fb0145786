#[allow(clippy::module_inception)]
mod config;

pub use config::{BuilderConfig, CONFIG_FILE_NAME, ConfigError};
