//! Shared fixtures for integration tests.

/// A complete `[Global]` section touching every recognized key.
#[allow(dead_code)]
pub const FULL_CONFIG: &str = r#"
# e2e test configuration
[Global]
cluster-id = "cluster-e2e"
cluster-distribution = CSI-Vanilla
user = "administrator@vsphere.local"
password = "Admin!23;#x"
vmc-cloudadminuser = cloudadmin@vmc.local
cloudadminpassword = "cl0ud"
vmc-devopsuser = devops@vmc.local
vmc-devopspassword = d3v\"ops
hostname = vc.example.com
port = 443
insecure-flag = true
datacenters = "dc-1, dc-2"
cnsregistervolumes-cleanup-intervalinmin = 1
csi-fetch-preferred-datastores-intervalinmin = 5
query-limit = 100
list-volume-threshold = 50
"#;

/// Wrap a body in a `[Global]` section the way the harness files look.
#[allow(dead_code)]
pub fn global(body: &str) -> String {
    format!("\n[Global]\n{}\n", body)
}
