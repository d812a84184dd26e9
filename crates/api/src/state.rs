use crate::client_ip::ClientIpExtractor;
use doh_relay_application::use_cases::{RelayDnsMessageUseCase, ResolveJsonUseCase};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayDnsMessageUseCase>,
    /// `None` when no JSON upstream is configured
    pub resolve_json: Option<Arc<ResolveJsonUseCase>>,
    pub client_ip: ClientIpExtractor,
}
