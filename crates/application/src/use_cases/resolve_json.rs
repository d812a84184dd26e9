use crate::ports::{JsonAnswer, JsonResolver};
use doh_relay_domain::{ClientSubnet, DomainError, JsonQuery, SubnetMasks};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::debug;

/// JSON resolution path: no wire format is touched, the masked subnet is
/// handed to the upstream JSON API as a query parameter instead.
pub struct ResolveJsonUseCase {
    resolver: Arc<dyn JsonResolver>,
    masks: Option<SubnetMasks>,
}

impl ResolveJsonUseCase {
    /// `masks` is `None` when client subnet forwarding is disabled.
    pub fn new(resolver: Arc<dyn JsonResolver>, masks: Option<SubnetMasks>) -> Self {
        Self { resolver, masks }
    }

    pub async fn execute(
        &self,
        query: &JsonQuery,
        client_ip: Option<IpAddr>,
    ) -> Result<JsonAnswer, DomainError> {
        query.validate()?;

        let subnet = match (self.masks, client_ip) {
            (Some(masks), Some(ip)) => Some(ClientSubnet::from_client(ip, &masks)?),
            _ => None,
        };

        debug!(
            name = %query.name,
            record_type = %query.record_type,
            subnet = ?subnet.map(|s| s.to_string()),
            "Resolving JSON query"
        );

        self.resolver.resolve(query, subnet).await
    }
}
