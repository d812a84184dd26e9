use doh_relay_application::ports::{JsonResolver, UpstreamTransport};
use doh_relay_domain::Config;
use doh_relay_infrastructure::dns::{FailoverTransport, JsonHttpResolver};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct Upstreams {
    pub transport: Arc<dyn UpstreamTransport>,
    pub json: Option<Arc<dyn JsonResolver>>,
}

impl Upstreams {
    pub fn new(config: &Config) -> Self {
        let timeout = Duration::from_secs(config.upstream.timeout_secs);

        let transport = FailoverTransport::from_urls(
            &config.upstream.servers,
            timeout,
            config.upstream.attempts,
        );
        info!(
            servers = transport.len(),
            attempts = config.upstream.attempts,
            timeout_secs = config.upstream.timeout_secs,
            "DoH upstreams configured"
        );

        let json = config.upstream.json_url.as_ref().map(|url| {
            info!(url = %url, "JSON upstream configured");
            Arc::new(JsonHttpResolver::new(url.clone(), timeout)) as Arc<dyn JsonResolver>
        });

        Self {
            transport: Arc::new(transport),
            json,
        }
    }
}
