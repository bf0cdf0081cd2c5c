//! Configuration schema definitions.
//!
//! This module defines the structure of the e2e test configuration file and
//! the table mapping file keys onto fields. All types derive Serde traits so
//! a parsed record can be dumped as JSON or TOML.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder shown instead of secrets in redacted output.
pub const REDACTED: &str = "********";

/// Root configuration for the e2e test harness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct E2eTestConfig {
    /// The `[Global]` section: vCenter connection details and cluster id.
    pub global: GlobalConfig,
}

impl E2eTestConfig {
    /// Section names recognized in the file.
    pub const SECTIONS: &'static [&'static str] = &["Global"];

    /// Resolve a section header to the record it populates.
    ///
    /// Section names compare case-insensitively. No section here accepts a
    /// subsection.
    pub fn section_mut(&mut self, name: &str, subsection: Option<&str>) -> Option<&mut GlobalConfig> {
        match subsection {
            None if name.eq_ignore_ascii_case("global") => Some(&mut self.global),
            _ => None,
        }
    }

    /// Copy with every non-empty password replaced by [`REDACTED`].
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        let g = &mut copy.global;
        for secret in [
            &mut g.password,
            &mut g.vmc_cloud_password,
            &mut g.vmc_devops_password,
        ] {
            if !secret.is_empty() {
                *secret = REDACTED.to_string();
            }
        }
        copy
    }
}

/// vCenter connection details and tuning values from the `[Global]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Kubernetes cluster id.
    pub cluster_id: String,

    /// Kubernetes cluster distribution.
    pub cluster_distribution: String,

    /// vCenter username.
    pub user: String,

    /// vCenter password in clear text.
    pub password: String,

    /// VMC cloudadmin username.
    pub vmc_cloud_user: String,

    /// VMC cloudadmin password.
    pub vmc_cloud_password: String,

    /// VMC devops username.
    pub vmc_devops_user: String,

    /// VMC devops password.
    pub vmc_devops_password: String,

    /// vCenter hostname.
    pub vcenter_hostname: String,

    /// vCenter port, kept as text.
    pub vcenter_port: String,

    /// True if vCenter uses a self-signed cert.
    pub insecure_flag: bool,

    /// Datacenters in which the VMs are located.
    pub datacenters: String,

    /// Interval after which successful CnsRegisterVolumes are cleaned up.
    pub cns_register_volumes_cleanup_interval_in_min: i64,

    /// Refresh interval for preferred datastores (topology).
    pub csi_fetch_preferred_datastores_interval_in_min: i64,

    /// Volumes fetched per CNS QueryAll call.
    pub query_limit: i64,

    /// Maximum volume count difference tolerated between CNS and Kubernetes.
    pub list_volume_threshold: i64,
}

/// Outcome of assigning a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assigned {
    Known,
    Unknown,
}

/// Value conversion failures for a recognized key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("missing value")]
    MissingValue,

    #[error("invalid boolean {0:?}")]
    InvalidBool(String),

    #[error("invalid integer {0:?}")]
    InvalidInt(String),
}

impl GlobalConfig {
    /// Keys recognized in `[Global]`, in declaration order.
    pub const KEYS: &'static [&'static str] = &[
        "cluster-id",
        "cluster-distribution",
        "user",
        "password",
        "vmc-cloudadminuser",
        "cloudadminpassword",
        "vmc-devopsuser",
        "vmc-devopspassword",
        "hostname",
        "port",
        "insecure-flag",
        "datacenters",
        "cnsregistervolumes-cleanup-intervalinmin",
        "csi-fetch-preferred-datastores-intervalinmin",
        "query-limit",
        "list-volume-threshold",
    ];

    /// Assign `value` to the field named by `key`.
    ///
    /// Keys compare case-insensitively. `None` is a key written without `=`.
    /// Unknown keys leave the record untouched.
    pub fn assign(&mut self, key: &str, value: Option<&str>) -> Result<Assigned, FieldError> {
        let key = key.to_ascii_lowercase();
        let field = match key.as_str() {
            "cluster-id" => &mut self.cluster_id,
            "cluster-distribution" => &mut self.cluster_distribution,
            "user" => &mut self.user,
            "password" => &mut self.password,
            "vmc-cloudadminuser" => &mut self.vmc_cloud_user,
            "cloudadminpassword" => &mut self.vmc_cloud_password,
            "vmc-devopsuser" => &mut self.vmc_devops_user,
            "vmc-devopspassword" => &mut self.vmc_devops_password,
            "hostname" => &mut self.vcenter_hostname,
            "port" => &mut self.vcenter_port,
            "datacenters" => &mut self.datacenters,
            "insecure-flag" => {
                self.insecure_flag = parse_bool(value)?;
                return Ok(Assigned::Known);
            }
            "cnsregistervolumes-cleanup-intervalinmin" => {
                self.cns_register_volumes_cleanup_interval_in_min = parse_int(value)?;
                return Ok(Assigned::Known);
            }
            "csi-fetch-preferred-datastores-intervalinmin" => {
                self.csi_fetch_preferred_datastores_interval_in_min = parse_int(value)?;
                return Ok(Assigned::Known);
            }
            "query-limit" => {
                self.query_limit = parse_int(value)?;
                return Ok(Assigned::Known);
            }
            "list-volume-threshold" => {
                self.list_volume_threshold = parse_int(value)?;
                return Ok(Assigned::Known);
            }
            _ => return Ok(Assigned::Unknown),
        };

        *field = value.ok_or(FieldError::MissingValue)?.to_string();
        Ok(Assigned::Known)
    }
}

/// A blank bool (key without `=`) means true; an empty value means false.
fn parse_bool(value: Option<&str>) -> Result<bool, FieldError> {
    let Some(raw) = value else {
        return Ok(true);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" | "" => Ok(false),
        _ => Err(FieldError::InvalidBool(raw.to_string())),
    }
}

fn parse_int(value: Option<&str>) -> Result<i64, FieldError> {
    let raw = value.ok_or(FieldError::MissingValue)?;
    raw.trim()
        .parse()
        .map_err(|_| FieldError::InvalidInt(raw.to_string()))
}
