use async_trait::async_trait;
use doh_relay_application::ports::{UpstreamResponse, UpstreamTransport};
use doh_relay_domain::DomainError;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::https::HttpsTransport;

/// Tries upstreams in order, making `attempts` passes over the list.
///
/// An upstream that answers with a 4xx status rejected the query itself, so
/// that answer is returned without trying the others.
pub struct FailoverTransport {
    servers: Vec<Arc<dyn UpstreamTransport>>,
    attempts: u32,
    label: String,
}

impl FailoverTransport {
    pub fn new(servers: Vec<Arc<dyn UpstreamTransport>>, attempts: u32) -> Self {
        let label = servers
            .iter()
            .map(|s| s.server())
            .collect::<Vec<_>>()
            .join(",");
        Self {
            servers,
            attempts: attempts.max(1),
            label,
        }
    }

    pub fn from_urls(urls: &[String], timeout: Duration, attempts: u32) -> Self {
        let servers = urls
            .iter()
            .map(|url| {
                Arc::new(HttpsTransport::new(url.clone(), timeout)) as Arc<dyn UpstreamTransport>
            })
            .collect();
        Self::new(servers, attempts)
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

#[async_trait]
impl UpstreamTransport for FailoverTransport {
    async fn send(&self, message: &[u8]) -> Result<UpstreamResponse, DomainError> {
        if self.servers.is_empty() {
            return Err(DomainError::TransportAllServersUnreachable);
        }

        for attempt in 0..self.attempts {
            for (index, server) in self.servers.iter().enumerate() {
                match server.send(message).await {
                    Ok(response) => {
                        debug!(server = %response.server, attempt, position = index, "Server responded");
                        return Ok(response);
                    }
                    Err(e @ DomainError::UpstreamStatus { status: 400..=499, .. }) => {
                        warn!(server = %server.server(), error = %e, "Upstream rejected query");
                        return Err(e);
                    }
                    Err(e) => {
                        warn!(server = %server.server(), error = %e, attempt, position = index, "Failing over");
                    }
                }
            }
        }

        Err(DomainError::TransportAllServersUnreachable)
    }

    fn server(&self) -> &str {
        &self.label
    }
}
