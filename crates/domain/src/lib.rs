//! DoH Relay Domain Layer
pub mod client_subnet;
pub mod config;
pub mod doh_request;
pub mod errors;
pub mod json_query;

pub use client_subnet::{canonical_ip, ClientSubnet, SubnetMasks};
pub use config::{CliOverrides, Config, ConfigError};
pub use doh_request::DohRequest;
pub use errors::DomainError;
pub use json_query::JsonQuery;
