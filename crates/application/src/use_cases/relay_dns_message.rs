use crate::ports::{ClientSubnetInjector, UpstreamResponse, UpstreamTransport};
use doh_relay_domain::{DohRequest, DomainError};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// RFC 8484 §6: a DoH message is bounded by the 16-bit DNS length prefix.
pub const MAX_DNS_MESSAGE_LEN: usize = 65_535;

pub struct RelayDnsMessageUseCase {
    injector: Arc<dyn ClientSubnetInjector>,
    transport: Arc<dyn UpstreamTransport>,
}

impl RelayDnsMessageUseCase {
    pub fn new(
        injector: Arc<dyn ClientSubnetInjector>,
        transport: Arc<dyn UpstreamTransport>,
    ) -> Self {
        Self {
            injector,
            transport,
        }
    }

    /// Injects the client subnet into the query and forwards it upstream.
    ///
    /// Queries the injector cannot parse are still forwarded, unmodified.
    pub async fn execute(&self, request: &DohRequest) -> Result<UpstreamResponse, DomainError> {
        if request.message.is_empty() {
            return Err(DomainError::InvalidDnsMessage(
                "empty DNS message".to_string(),
            ));
        }
        if request.message.len() > MAX_DNS_MESSAGE_LEN {
            return Err(DomainError::MessageTooLarge(request.message.len()));
        }

        let start = Instant::now();
        let outbound = self.injector.inject(&request.message, request.client_ip);

        debug!(
            client_ip = ?request.client_ip,
            inbound_len = request.message.len(),
            outbound_len = outbound.len(),
            rewritten = outbound != request.message,
            "Prepared upstream query"
        );

        match self.transport.send(&outbound).await {
            Ok(response) => {
                debug!(
                    server = %response.server,
                    response_len = response.bytes.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream answered"
                );
                Ok(response)
            }
            Err(e) => {
                warn!(
                    upstream = %self.transport.server(),
                    error = %e,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream query failed"
                );
                Err(e)
            }
        }
    }
}
