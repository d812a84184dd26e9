use async_trait::async_trait;
use doh_relay_domain::DomainError;

/// Media type of DNS-over-HTTPS bodies (RFC 8484 §6)
pub const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// Raw DNS wire-format response, relayed unchanged
    pub bytes: Vec<u8>,

    /// `Cache-Control` sent by the upstream, if any
    pub cache_control: Option<String>,

    pub server: String,
}

#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    async fn send(&self, message: &[u8]) -> Result<UpstreamResponse, DomainError>;

    /// Human-readable upstream identity for logs
    fn server(&self) -> &str;
}
