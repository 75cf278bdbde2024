//! Configuration and logging support

pub mod config;
pub mod logging;

pub use config::{ConfigError, ConfigurationManager, MapperConfig};
pub use logging::init_logging;
