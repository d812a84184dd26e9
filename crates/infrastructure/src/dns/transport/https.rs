//! HTTPS transport to the upstream resolver: DNS-over-HTTPS (RFC 8484)
//!
//! Every query goes out as a POST, whatever method the client used, so GET
//! URL-length limits never apply upstream:
//! ```text
//! POST /dns-query HTTP/2
//! Content-Type: application/dns-message
//! Accept: application/dns-message
//!
//! <raw DNS message bytes>
//! ```

use super::shared_client;
use async_trait::async_trait;
use doh_relay_application::ports::{
    UpstreamResponse, UpstreamTransport, DNS_MESSAGE_CONTENT_TYPE,
};
use doh_relay_domain::DomainError;
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

/// DNS-over-HTTPS upstream (RFC 8484)
pub struct HttpsTransport {
    url: String,
    timeout: Duration,
}

impl HttpsTransport {
    pub fn new(url: String, timeout: Duration) -> Self {
        Self { url, timeout }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn request_error(&self, e: reqwest::Error) -> DomainError {
        if e.is_timeout() {
            DomainError::TransportTimeout {
                server: self.url.clone(),
            }
        } else {
            DomainError::TransportError {
                server: self.url.clone(),
                reason: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl UpstreamTransport for HttpsTransport {
    async fn send(&self, message: &[u8]) -> Result<UpstreamResponse, DomainError> {
        debug!(
            url = %self.url,
            message_len = message.len(),
            "Sending DoH query"
        );

        let timeout_error = || DomainError::TransportTimeout {
            server: self.url.clone(),
        };

        let response = tokio::time::timeout(
            self.timeout,
            shared_client()
                .post(&self.url)
                .header(CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE)
                .header(ACCEPT, DNS_MESSAGE_CONTENT_TYPE)
                .body(message.to_vec())
                .send(),
        )
        .await
        .map_err(|_| timeout_error())?
        .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::UpstreamStatus {
                server: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let cache_control = response
            .headers()
            .get(CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = tokio::time::timeout(self.timeout, response.bytes())
            .await
            .map_err(|_| timeout_error())?
            .map_err(|e| self.request_error(e))?;

        debug!(
            url = %self.url,
            response_len = bytes.len(),
            "DoH response received"
        );

        Ok(UpstreamResponse {
            bytes: bytes.to_vec(),
            cache_control,
            server: self.url.clone(),
        })
    }

    fn server(&self) -> &str {
        &self.url
    }
}
