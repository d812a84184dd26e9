use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("DNS message of {0} bytes exceeds the 65535 byte limit")]
    MessageTooLarge(usize),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid prefix length: {0}")]
    InvalidPrefixLength(String),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Upstream {server} returned HTTP {status}")]
    UpstreamStatus { server: String, status: u16 },

    #[error("Transport error talking to {server}: {reason}")]
    TransportError { server: String, reason: String },

    #[error("All upstream servers are unreachable")]
    TransportAllServersUnreachable,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
