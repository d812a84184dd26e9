#![allow(dead_code)]
use async_trait::async_trait;
use axum::{body::Body, extract::ConnectInfo, http::Request, Router};
use doh_relay_api::{create_api_routes, AppState, ClientIpExtractor};
use doh_relay_application::{
    ports::{
        ClientSubnet, JsonAnswer, JsonQuery, JsonResolver, UpstreamResponse, UpstreamTransport,
    },
    use_cases::{RelayDnsMessageUseCase, ResolveJsonUseCase},
};
use doh_relay_domain::{DomainError, SubnetMasks};
use doh_relay_infrastructure::dns::EcsInjector;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

pub const PEER: &str = "192.0.2.10:50000";

/// Echo-style upstream that records every query it is sent.
pub struct RecordingTransport {
    sent: Mutex<Vec<Vec<u8>>>,
    failure: Option<DomainError>,
}

impl RecordingTransport {
    pub fn answering() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            failure: None,
        })
    }

    pub fn failing(error: DomainError) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(error),
        })
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamTransport for RecordingTransport {
    async fn send(&self, message: &[u8]) -> Result<UpstreamResponse, DomainError> {
        self.sent.lock().unwrap().push(message.to_vec());
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let mut answer = message.to_vec();
        answer[2] |= 0x80; // QR
        Ok(UpstreamResponse {
            bytes: answer,
            cache_control: Some("max-age=300".to_string()),
            server: "mock".to_string(),
        })
    }

    fn server(&self) -> &str {
        "mock"
    }
}

pub struct RecordingJsonResolver {
    calls: Mutex<Vec<(JsonQuery, Option<String>)>>,
}

impl RecordingJsonResolver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(JsonQuery, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl JsonResolver for RecordingJsonResolver {
    async fn resolve(
        &self,
        query: &JsonQuery,
        subnet: Option<ClientSubnet>,
    ) -> Result<JsonAnswer, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.clone(), subnet.map(|s| s.to_string())));

        Ok(JsonAnswer {
            body: br#"{"Status":0}"#.to_vec(),
            content_type: "application/dns-json; charset=utf-8".to_string(),
            server: "mock-json".to_string(),
        })
    }
}

pub fn create_test_app(
    transport: Arc<RecordingTransport>,
    resolver: Arc<RecordingJsonResolver>,
) -> Router {
    let masks = SubnetMasks::default();
    let state = AppState {
        relay: Arc::new(RelayDnsMessageUseCase::new(
            Arc::new(EcsInjector::new(masks)),
            transport,
        )),
        resolve_json: Some(Arc::new(ResolveJsonUseCase::new(resolver, Some(masks)))),
        client_ip: ClientIpExtractor::new("x-forwarded-for").unwrap(),
    };
    create_api_routes(state)
}

pub fn create_test_app_without_json(transport: Arc<RecordingTransport>) -> Router {
    let state = AppState {
        relay: Arc::new(RelayDnsMessageUseCase::new(
            Arc::new(EcsInjector::default()),
            transport,
        )),
        resolve_json: None,
        client_ip: ClientIpExtractor::new("x-forwarded-for").unwrap(),
    };
    create_api_routes(state)
}

/// Attaches the socket peer the way `into_make_service_with_connect_info` does.
pub fn with_peer(mut request: Request<Body>) -> Request<Body> {
    let peer: SocketAddr = PEER.parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(peer));
    request
}

/// `example.com A` query with RD set and no additional records.
pub fn example_query() -> Vec<u8> {
    let mut buf = vec![
        0xAB, 0xCD, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];
    buf.extend_from_slice(b"\x07example\x03com\x00");
    buf.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
    buf
}

/// OPT RDATA carried by the last record of an injected `example_query()`.
pub fn trailing_option(sent: &[u8], len: usize) -> &[u8] {
    &sent[sent.len() - len..]
}
