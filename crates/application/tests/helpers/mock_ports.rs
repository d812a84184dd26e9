#![allow(dead_code)]

use async_trait::async_trait;
use doh_relay_application::ports::{
    ClientSubnetInjector, JsonAnswer, JsonResolver, UpstreamResponse, UpstreamTransport,
};
use doh_relay_domain::{ClientSubnet, DomainError, JsonQuery};
use std::net::IpAddr;
use std::sync::{Arc, Mutex};

/// Appends a marker byte per call so tests can see the rewrite happened.
#[derive(Default)]
pub struct MarkingInjector {
    seen: Mutex<Vec<Option<IpAddr>>>,
}

impl MarkingInjector {
    pub const MARKER: u8 = 0xEC;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen_clients(&self) -> Vec<Option<IpAddr>> {
        self.seen.lock().unwrap().clone()
    }
}

impl ClientSubnetInjector for MarkingInjector {
    fn inject(&self, message: &[u8], client_ip: Option<IpAddr>) -> Vec<u8> {
        self.seen.lock().unwrap().push(client_ip);
        let mut out = message.to_vec();
        if client_ip.is_some() {
            out.push(Self::MARKER);
        }
        out
    }
}

pub struct MockTransport {
    sent: Mutex<Vec<Vec<u8>>>,
    response: Mutex<Result<UpstreamResponse, DomainError>>,
}

impl MockTransport {
    pub fn answering(bytes: Vec<u8>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            response: Mutex::new(Ok(UpstreamResponse {
                bytes,
                cache_control: Some("max-age=300".to_string()),
                server: "mock://upstream".to_string(),
            })),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            response: Mutex::new(Err(error)),
        }
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamTransport for MockTransport {
    async fn send(&self, message: &[u8]) -> Result<UpstreamResponse, DomainError> {
        self.sent.lock().unwrap().push(message.to_vec());
        self.response.lock().unwrap().clone()
    }

    fn server(&self) -> &str {
        "mock://upstream"
    }
}

#[derive(Default)]
pub struct MockJsonResolver {
    calls: Mutex<Vec<(JsonQuery, Option<ClientSubnet>)>>,
}

impl MockJsonResolver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<(JsonQuery, Option<ClientSubnet>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl JsonResolver for MockJsonResolver {
    async fn resolve(
        &self,
        query: &JsonQuery,
        subnet: Option<ClientSubnet>,
    ) -> Result<JsonAnswer, DomainError> {
        self.calls.lock().unwrap().push((query.clone(), subnet));
        Ok(JsonAnswer {
            body: br#"{"Status":0}"#.to_vec(),
            content_type: "application/dns-json".to_string(),
            server: "mock://json".to_string(),
        })
    }
}
