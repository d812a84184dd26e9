//! EDNS Client Subnet injection (RFC 7871) on raw DNS wire format.
//!
//! The engine never builds a DNS object model. It walks just enough of the
//! message to find the additional section, then either rewrites the existing
//! OPT pseudo-record's option list or appends a fresh OPT record:
//!
//! ```text
//! header ─► questions ─► answers ─► authority ─► additional
//!  (12B)    name+4B      RR...      RR...        RR... [OPT: code 8 replaced]
//! ```
//!
//! Every failure is fail-open: the caller gets an unmodified copy of the
//! input and the query is still forwarded.

pub mod additional;
pub mod option;
pub mod reassemble;
pub mod sections;

pub use additional::{scan_additional, RrSpan};
pub use option::{build_ecs_option, ecs_option_for, AddressFamily};
pub use reassemble::inject_option;
pub use sections::{locate_additional_section, skip_name, AdditionalSection};

use doh_relay_application::ports::ClientSubnetInjector;
use doh_relay_domain::{canonical_ip, SubnetMasks};
use std::net::IpAddr;
use thiserror::Error;
use tracing::debug;

pub const HEADER_LEN: usize = 12;
pub const ARCOUNT_OFFSET: usize = 10;
pub const OPT_TYPE: u16 = 41;
pub const CLIENT_SUBNET_CODE: u16 = 8;
/// Requester UDP payload size advertised by a synthesized OPT record.
pub const OPT_UDP_PAYLOAD_SIZE: u16 = 4096;

/// Structural problems that make a message unsafe to rewrite.
///
/// Never escapes [`inject`]; it only selects the fail-open path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("message truncated: needed {needed} bytes, have {len}")]
    Truncated { needed: usize, len: usize },

    #[error("unsupported label type 0x{label:02x} at offset {offset}")]
    UnsupportedLabel { offset: usize, label: u8 },

    #[error("EDNS option at offset {offset} overruns the OPT RDATA")]
    OptionOverrun { offset: usize },

    #[error("more than one OPT record in the additional section")]
    DuplicateOpt,

    #[error("additional record count cannot be incremented past 65535")]
    AdditionalCountOverflow,

    #[error("OPT RDATA of {0} bytes does not fit RDLENGTH")]
    RdataTooLong(usize),
}

/// Injects a Client-Subnet option for `client_ip` into `message`.
///
/// Returns a fresh buffer in every case; it is an identical copy when the
/// address is absent or unparseable, or when the message cannot be walked.
pub fn inject(
    message: &[u8],
    client_ip: Option<&str>,
    ipv4_prefix: u8,
    ipv6_prefix: u8,
) -> Vec<u8> {
    let parsed = client_ip
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .and_then(|ip| ip.parse::<IpAddr>().ok());

    match parsed {
        Some(ip) => inject_for_ip(message, ip, ipv4_prefix, ipv6_prefix),
        None => message.to_vec(),
    }
}

pub fn inject_for_ip(message: &[u8], ip: IpAddr, ipv4_prefix: u8, ipv6_prefix: u8) -> Vec<u8> {
    let ip = canonical_ip(ip);
    let prefix = match ip {
        IpAddr::V4(_) => ipv4_prefix,
        IpAddr::V6(_) => ipv6_prefix,
    };
    let option = ecs_option_for(ip, prefix);

    match inject_option(message, &option) {
        Ok(rewritten) => rewritten,
        Err(e) => {
            debug!(
                error = %e,
                message_len = message.len(),
                "Forwarding query without client subnet"
            );
            message.to_vec()
        }
    }
}

/// Client subnet injector bound to the configured prefix lengths.
#[derive(Debug, Clone, Copy, Default)]
pub struct EcsInjector {
    masks: SubnetMasks,
}

impl EcsInjector {
    pub fn new(masks: SubnetMasks) -> Self {
        Self { masks }
    }

    pub fn masks(&self) -> SubnetMasks {
        self.masks
    }
}

impl ClientSubnetInjector for EcsInjector {
    fn inject(&self, message: &[u8], client_ip: Option<IpAddr>) -> Vec<u8> {
        match client_ip {
            Some(ip) => inject_for_ip(message, ip, self.masks.ipv4(), self.masks.ipv6()),
            None => message.to_vec(),
        }
    }
}

/// Used when client subnet forwarding is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughInjector;

impl ClientSubnetInjector for PassthroughInjector {
    fn inject(&self, message: &[u8], _client_ip: Option<IpAddr>) -> Vec<u8> {
        message.to_vec()
    }
}
