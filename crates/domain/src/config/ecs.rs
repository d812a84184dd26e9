use serde::{Deserialize, Serialize};

use crate::client_subnet::SubnetMasks;
use crate::errors::DomainError;

/// EDNS Client Subnet injection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EcsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_ipv4_prefix")]
    pub ipv4_prefix: u8,

    #[serde(default = "default_ipv6_prefix")]
    pub ipv6_prefix: u8,

    /// Header set by the trusted reverse proxy in front of the relay.
    /// Empty when clients connect directly; only the socket peer is used then.
    #[serde(default = "default_client_ip_header")]
    pub client_ip_header: String,
}

impl Default for EcsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ipv4_prefix: default_ipv4_prefix(),
            ipv6_prefix: default_ipv6_prefix(),
            client_ip_header: default_client_ip_header(),
        }
    }
}

impl EcsConfig {
    pub fn masks(&self) -> Result<SubnetMasks, DomainError> {
        SubnetMasks::new(self.ipv4_prefix, self.ipv6_prefix)
    }
}

fn default_true() -> bool {
    true
}

fn default_ipv4_prefix() -> u8 {
    24
}

fn default_ipv6_prefix() -> u8 {
    56
}

fn default_client_ip_header() -> String {
    "x-forwarded-for".to_string()
}
