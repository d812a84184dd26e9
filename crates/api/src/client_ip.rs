//! Client address resolution for subnet injection.
//!
//! Behind a reverse proxy the socket peer is the proxy itself, so the first
//! entry of a trusted forwarding header wins. The socket peer address is the
//! fallback whenever the header is absent or does not parse.

use crate::state::AppState;
use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap, HeaderName},
};
use doh_relay_domain::DomainError;
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

#[derive(Debug, Clone, Default)]
pub struct ClientIpExtractor {
    header: Option<HeaderName>,
}

impl ClientIpExtractor {
    /// An empty header name disables header lookup entirely.
    pub fn new(header: &str) -> Result<Self, DomainError> {
        let header = header.trim();
        if header.is_empty() {
            return Ok(Self { header: None });
        }

        let name = HeaderName::from_bytes(header.to_ascii_lowercase().as_bytes()).map_err(|_| {
            DomainError::ConfigError(format!("invalid client IP header name '{}'", header))
        })?;

        Ok(Self { header: Some(name) })
    }

    pub fn header(&self) -> Option<&HeaderName> {
        self.header.as_ref()
    }

    pub fn extract(&self, headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<IpAddr> {
        self.header
            .as_ref()
            .and_then(|name| headers.get(name))
            .and_then(|value| value.to_str().ok())
            .and_then(parse_forwarded_ip)
            .or_else(|| peer.map(|addr| addr.ip()))
    }
}

/// Parses the first entry of an `X-Forwarded-For` style value.
///
/// Accepts `ip`, `ip:port`, `[ipv6]` and `[ipv6]:port`.
pub fn parse_forwarded_ip(value: &str) -> Option<IpAddr> {
    let first = value.split(',').next()?.trim().trim_matches('"');
    if first.is_empty() {
        return None;
    }

    if let Ok(ip) = first.parse::<IpAddr>() {
        return Some(ip);
    }
    if let Ok(addr) = first.parse::<SocketAddr>() {
        return Some(addr.ip());
    }

    first
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .and_then(|inner| inner.parse::<IpAddr>().ok())
}

/// Resolved client address of the current request, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientAddr(pub Option<IpAddr>);

impl FromRequestParts<AppState> for ClientAddr {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(Self(state.client_ip.extract(&parts.headers, peer)))
    }
}
