use crate::errors::DomainError;
use ipnetwork::IpNetwork;
use std::fmt;
use std::net::IpAddr;

pub const MAX_IPV4_PREFIX: u8 = 32;
pub const MAX_IPV6_PREFIX: u8 = 128;

/// Source prefix lengths applied to client addresses before they are sent
/// upstream in an EDNS Client Subnet option (RFC 7871).
///
/// Built once from configuration; the constructor rejects out-of-range
/// values instead of clamping them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubnetMasks {
    ipv4: u8,
    ipv6: u8,
}

impl SubnetMasks {
    pub fn new(ipv4: u8, ipv6: u8) -> Result<Self, DomainError> {
        if ipv4 == 0 || ipv4 > MAX_IPV4_PREFIX {
            return Err(DomainError::InvalidPrefixLength(format!(
                "IPv4 prefix must be between 1 and {}, got {}",
                MAX_IPV4_PREFIX, ipv4
            )));
        }
        if ipv6 == 0 || ipv6 > MAX_IPV6_PREFIX {
            return Err(DomainError::InvalidPrefixLength(format!(
                "IPv6 prefix must be between 1 and {}, got {}",
                MAX_IPV6_PREFIX, ipv6
            )));
        }
        Ok(Self { ipv4, ipv6 })
    }

    pub fn ipv4(&self) -> u8 {
        self.ipv4
    }

    pub fn ipv6(&self) -> u8 {
        self.ipv6
    }

    /// Prefix length for the family of `ip` (after IPv4-mapped unwrapping).
    pub fn prefix_for(&self, ip: &IpAddr) -> u8 {
        match canonical_ip(*ip) {
            IpAddr::V4(_) => self.ipv4,
            IpAddr::V6(_) => self.ipv6,
        }
    }
}

impl Default for SubnetMasks {
    fn default() -> Self {
        Self { ipv4: 24, ipv6: 56 }
    }
}

/// Unwraps IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) so that dual-stack
/// listeners report IPv4 clients with the IPv4 family.
pub fn canonical_ip(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(ip),
        v4 => v4,
    }
}

/// A client address truncated to its configured prefix, e.g. `203.0.113.0/24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSubnet {
    network: IpAddr,
    prefix: u8,
}

impl ClientSubnet {
    pub fn new(ip: IpAddr, prefix: u8) -> Result<Self, DomainError> {
        let network = IpNetwork::new(canonical_ip(ip), prefix)
            .map_err(|e| DomainError::InvalidPrefixLength(e.to_string()))?;
        Ok(Self {
            network: network.network(),
            prefix,
        })
    }

    pub fn from_client(ip: IpAddr, masks: &SubnetMasks) -> Result<Self, DomainError> {
        Self::new(ip, masks.prefix_for(&ip))
    }

    pub fn network(&self) -> IpAddr {
        self.network
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }
}

impl fmt::Display for ClientSubnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}
