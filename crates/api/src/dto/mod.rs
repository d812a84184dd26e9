pub mod dns_query;
pub mod resolve;

pub use dns_query::DnsQueryParams;
pub use resolve::ResolveParams;
