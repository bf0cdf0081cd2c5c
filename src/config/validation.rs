//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (the decoder handles syntax)
//! - Check the fields a vCenter session cannot do without
//! - Validate value ranges (port fits u16, intervals not negative)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: E2eTestConfig → Result<(), Vec<ValidationError>>
//! - Never run by the parser; consumers opt in

use thiserror::Error;

use crate::config::schema::E2eTestConfig;

/// A semantic problem with an otherwise well-formed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required key `{0}`")]
    MissingField(&'static str),

    #[error("port {0:?} is not a valid TCP port")]
    InvalidPort(String),

    #[error("`{key}` must not be negative (got {value})")]
    NegativeValue { key: &'static str, value: i64 },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &E2eTestConfig) -> Result<(), Vec<ValidationError>> {
    let g = &config.global;
    let mut errors = Vec::new();

    if g.vcenter_hostname.is_empty() {
        errors.push(ValidationError::MissingField("hostname"));
    }
    if g.user.is_empty() {
        errors.push(ValidationError::MissingField("user"));
    }
    if !g.vcenter_port.is_empty() && g.vcenter_port.parse::<u16>().is_err() {
        errors.push(ValidationError::InvalidPort(g.vcenter_port.clone()));
    }

    let tunables = [
        (
            "cnsregistervolumes-cleanup-intervalinmin",
            g.cns_register_volumes_cleanup_interval_in_min,
        ),
        (
            "csi-fetch-preferred-datastores-intervalinmin",
            g.csi_fetch_preferred_datastores_interval_in_min,
        ),
        ("query-limit", g.query_limit),
        ("list-volume-threshold", g.list_volume_threshold),
    ];
    for (key, value) in tunables {
        if value < 0 {
            errors.push(ValidationError::NegativeValue { key, value });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> E2eTestConfig {
        let mut cfg = E2eTestConfig::default();
        cfg.global.vcenter_hostname = "vc.example.com".into();
        cfg.global.user = "administrator@vsphere.local".into();
        cfg.global.vcenter_port = "443".into();
        cfg
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_empty_port_is_allowed() {
        let mut cfg = valid();
        cfg.global.vcenter_port.clear();
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut cfg = E2eTestConfig::default();
        cfg.global.vcenter_port = "70000".into();
        cfg.global.query_limit = -1;

        let errors = validate_config(&cfg).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingField("hostname"),
                ValidationError::MissingField("user"),
                ValidationError::InvalidPort("70000".into()),
                ValidationError::NegativeValue { key: "query-limit", value: -1 },
            ]
        );
    }
}
