use std::net::IpAddr;

/// Rewrites an outbound DNS query so it carries the client's subnet.
///
/// Implementations never fail: a query that cannot be rewritten safely is
/// returned as an unmodified copy.
pub trait ClientSubnetInjector: Send + Sync {
    fn inject(&self, message: &[u8], client_ip: Option<IpAddr>) -> Vec<u8>;
}
