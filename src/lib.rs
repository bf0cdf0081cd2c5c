//! Reader for the vSphere CSI e2e test configuration file.

pub mod config;
pub mod ini;
pub mod observability;

pub use config::schema::E2eTestConfig;
pub use config::{read_config, ConfigError};
