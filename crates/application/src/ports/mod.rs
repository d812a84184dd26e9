mod client_subnet_injector;
mod json_resolver;
mod upstream_transport;

pub use client_subnet_injector::ClientSubnetInjector;
pub use json_resolver::{JsonAnswer, JsonResolver};
pub use upstream_transport::{UpstreamResponse, UpstreamTransport, DNS_MESSAGE_CONTENT_TYPE};

// Re-export for convenience
pub use doh_relay_domain::{ClientSubnet, DohRequest, JsonQuery};
