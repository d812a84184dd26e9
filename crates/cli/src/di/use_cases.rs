use super::Upstreams;
use doh_relay_application::ports::ClientSubnetInjector;
use doh_relay_application::use_cases::{RelayDnsMessageUseCase, ResolveJsonUseCase};
use doh_relay_domain::Config;
use doh_relay_infrastructure::dns::{EcsInjector, PassthroughInjector};
use std::sync::Arc;
use tracing::info;

pub struct UseCases {
    pub relay: Arc<RelayDnsMessageUseCase>,
    pub resolve_json: Option<Arc<ResolveJsonUseCase>>,
}

impl UseCases {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let upstreams = Upstreams::new(config);

        let masks = if config.ecs.enabled {
            Some(config.ecs.masks()?)
        } else {
            None
        };

        let injector: Arc<dyn ClientSubnetInjector> = match masks {
            Some(masks) => Arc::new(EcsInjector::new(masks)),
            None => {
                info!("Client subnet injection disabled, queries are relayed unchanged");
                Arc::new(PassthroughInjector)
            }
        };

        let resolve_json = upstreams
            .json
            .map(|resolver| Arc::new(ResolveJsonUseCase::new(resolver, masks)));

        Ok(Self {
            relay: Arc::new(RelayDnsMessageUseCase::new(injector, upstreams.transport)),
            resolve_json,
        })
    }
}
