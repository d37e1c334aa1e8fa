pub mod config;
pub mod repo;
pub mod sources;

pub use self::config::{Config, ConfigError, ConfigResult};
