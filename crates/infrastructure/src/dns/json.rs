//! JSON resolution path (`application/dns-json`)
//!
//! Forwards `/resolve` queries to a JSON DNS API such as
//! `https://dns.google/resolve`, passing the masked client subnet as the
//! `edns_client_subnet` parameter. No wire format is involved.

use super::transport::shared_client;
use async_trait::async_trait;
use doh_relay_application::ports::{JsonAnswer, JsonResolver};
use doh_relay_domain::{ClientSubnet, DomainError, JsonQuery};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

pub const DNS_JSON_CONTENT_TYPE: &str = "application/dns-json";

pub struct JsonHttpResolver {
    url: String,
    timeout: Duration,
}

impl JsonHttpResolver {
    pub fn new(url: String, timeout: Duration) -> Self {
        Self { url, timeout }
    }

    /// Query-string pairs sent upstream, in a stable order.
    pub fn query_params(
        query: &JsonQuery,
        subnet: Option<ClientSubnet>,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("name", query.name.clone()),
            ("type", query.record_type.clone()),
        ];
        if query.dnssec_ok {
            params.push(("do", "1".to_string()));
        }
        if query.checking_disabled {
            params.push(("cd", "1".to_string()));
        }
        if let Some(subnet) = subnet {
            params.push(("edns_client_subnet", subnet.to_string()));
        }
        params
    }
}

#[async_trait]
impl JsonResolver for JsonHttpResolver {
    async fn resolve(
        &self,
        query: &JsonQuery,
        subnet: Option<ClientSubnet>,
    ) -> Result<JsonAnswer, DomainError> {
        let params = Self::query_params(query, subnet);
        debug!(url = %self.url, name = %query.name, "Sending JSON query");

        let transport_error = |e: reqwest::Error| {
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
        };

        let response = shared_client()
            .get(&self.url)
            .query(&params)
            .header(ACCEPT, DNS_JSON_CONTENT_TYPE)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::UpstreamStatus {
                server: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DNS_JSON_CONTENT_TYPE)
            .to_string();

        let body = response.bytes().await.map_err(transport_error)?;

        debug!(url = %self.url, response_len = body.len(), "JSON response received");

        Ok(JsonAnswer {
            body: body.to_vec(),
            content_type,
            server: self.url.clone(),
        })
    }
}
