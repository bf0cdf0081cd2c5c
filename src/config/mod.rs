//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file / reader / E2E_TEST_CONF_FILE
//!     → loader.rs (read stream, drive decoder)
//!     → ini (syntax: sections, quoting, escapes)
//!     → schema.rs (key → field mapping, value conversion)
//!     → E2eTestConfig
//!     → validation.rs (optional semantic checks)
//! ```
//!
//! # Design Decisions
//! - Every field defaults to its zero value; nothing is required at parse time
//! - Unknown sections and keys are skipped unless strict mode is requested
//! - Validation separates syntactic (decoder) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{
    load_config, load_config_from_env, read_config, read_config_str, read_config_with,
    ConfigError, ReadOptions, CONFIG_ENV_VAR,
};
pub use schema::E2eTestConfig;
pub use schema::GlobalConfig;
pub use validation::{validate_config, ValidationError};
