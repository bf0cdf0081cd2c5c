//! Configuration loading from readers, files and the environment.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{Assigned, E2eTestConfig, FieldError};
use crate::ini::{self, DecodeError, Event};

/// Environment variable holding the path of the e2e config file.
pub const CONFIG_ENV_VAR: &str = "E2E_TEST_CONF_FILE";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The caller passed no stream at all.
    #[error("no config file given")]
    NoInput,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The text does not follow the file grammar.
    #[error("Parse error: {0}")]
    Decode(#[from] DecodeError),

    /// A recognized key carried a value of the wrong shape.
    #[error("Parse error: line {line}: key `{key}`: {source}")]
    Field {
        line: usize,
        key: String,
        source: FieldError,
    },

    #[error("line {line}: unknown section `{section}`")]
    UnknownSection { line: usize, section: String },

    #[error("line {line}: unknown key `{key}` in section `{section}`")]
    UnknownKey {
        line: usize,
        section: String,
        key: String,
    },

    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),
}

/// Knobs for [`read_config_with`].
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Reject unknown sections and keys instead of skipping them.
    pub strict: bool,
}

/// Parse e2e test configuration from `config`.
///
/// Unknown sections and keys are logged and skipped.
pub fn read_config<R: Read>(config: Option<R>) -> Result<E2eTestConfig, ConfigError> {
    read_config_with(config, &ReadOptions::default())
}

/// Parse e2e test configuration from `config` with explicit options.
pub fn read_config_with<R: Read>(
    config: Option<R>,
    options: &ReadOptions,
) -> Result<E2eTestConfig, ConfigError> {
    let mut reader = config.ok_or(ConfigError::NoInput)?;
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode(ini::decode_utf8(&bytes)?, options)
}

/// Parse e2e test configuration held in memory.
pub fn read_config_str(text: &str) -> Result<E2eTestConfig, ConfigError> {
    read_config(Some(text.as_bytes()))
}

/// Load configuration from a file.
pub fn load_config(path: &Path, options: &ReadOptions) -> Result<E2eTestConfig, ConfigError> {
    let file = File::open(path)?;
    let config = read_config_with(Some(file), options)?;
    tracing::debug!(path = ?path, "Config loaded");
    Ok(config)
}

/// Load configuration from the file named by `E2E_TEST_CONF_FILE`.
pub fn load_config_from_env(options: &ReadOptions) -> Result<E2eTestConfig, ConfigError> {
    let path = std::env::var_os(CONFIG_ENV_VAR)
        .filter(|p| !p.is_empty())
        .ok_or(ConfigError::MissingEnv(CONFIG_ENV_VAR))?;
    load_config(Path::new(&path), options)
}

fn decode(text: &str, options: &ReadOptions) -> Result<E2eTestConfig, ConfigError> {
    let mut cfg = E2eTestConfig::default();

    for event in ini::parse_str(text)? {
        let entry = match event {
            Event::Section(header) => {
                let known = cfg
                    .section_mut(&header.name, header.subsection.as_deref())
                    .is_some();
                if !known {
                    if options.strict {
                        return Err(ConfigError::UnknownSection {
                            line: header.line,
                            section: header.name,
                        });
                    }
                    tracing::warn!(
                        line = header.line,
                        section = %header.name,
                        "Ignoring unknown section"
                    );
                }
                continue;
            }
            Event::Entry(entry) => entry,
        };

        // Keys under an unknown section were already reported with its header.
        let Some(section) = cfg.section_mut(&entry.section, entry.subsection.as_deref()) else {
            continue;
        };

        let assigned = section
            .assign(&entry.name, entry.value.as_deref())
            .map_err(|source| ConfigError::Field {
                line: entry.line,
                key: entry.name.clone(),
                source,
            })?;

        if assigned == Assigned::Unknown {
            if options.strict {
                return Err(ConfigError::UnknownKey {
                    line: entry.line,
                    section: entry.section,
                    key: entry.name,
                });
            }
            tracing::warn!(
                line = entry.line,
                section = %entry.section,
                key = %entry.name,
                "Ignoring unknown key"
            );
        }
    }

    Ok(cfg)
}
