//! RFC 8484 endpoint: `GET /dns-query?dns=<base64url>` and `POST /dns-query`.

use crate::{client_ip::ClientAddr, dto::DnsQueryParams, errors::ApiError, state::AppState};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE},
        HeaderMap, HeaderValue,
    },
    response::{IntoResponse, Response},
};
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use doh_relay_application::{
    ports::{UpstreamResponse, DNS_MESSAGE_CONTENT_TYPE},
    use_cases::MAX_DNS_MESSAGE_LEN,
};
use doh_relay_domain::{DohRequest, DomainError};
use tracing::{debug, instrument};

/// base64url that decodes padded and unpadded input alike.
const BASE64URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[instrument(skip_all, name = "api_dns_query_get")]
pub async fn dns_query_get(
    State(state): State<AppState>,
    ClientAddr(client): ClientAddr,
    Query(params): Query<DnsQueryParams>,
) -> Result<Response, ApiError> {
    let encoded = params
        .dns
        .ok_or_else(|| DomainError::InvalidRequest("missing 'dns' parameter".to_string()))?;

    let message = decode_dns_param(&encoded)?;
    debug!(client = ?client, message_len = message.len(), "Decoded GET query");

    relay(&state, DohRequest::new(message, client)).await
}

#[instrument(skip_all, name = "api_dns_query_post")]
pub async fn dns_query_post(
    State(state): State<AppState>,
    ClientAddr(client): ClientAddr,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    if let Some(content_type) = headers.get(CONTENT_TYPE) {
        check_content_type(content_type)?;
    }
    if body.len() > MAX_DNS_MESSAGE_LEN {
        return Err(DomainError::MessageTooLarge(body.len()).into());
    }
    debug!(client = ?client, message_len = body.len(), "Received POST query");

    relay(&state, DohRequest::new(body.to_vec(), client)).await
}

async fn relay(state: &AppState, request: DohRequest) -> Result<Response, ApiError> {
    let response = state.relay.execute(&request).await?;
    Ok(dns_message_response(response))
}

pub fn decode_dns_param(encoded: &str) -> Result<Vec<u8>, DomainError> {
    BASE64URL
        .decode(encoded.trim())
        .map_err(|e| {
            DomainError::InvalidRequest(format!("invalid base64url 'dns' parameter: {}", e))
        })
}

fn check_content_type(value: &HeaderValue) -> Result<(), DomainError> {
    let raw = value.to_str().unwrap_or_default();
    let essence = raw.split(';').next().unwrap_or_default().trim();

    if essence.eq_ignore_ascii_case(DNS_MESSAGE_CONTENT_TYPE) {
        Ok(())
    } else {
        Err(DomainError::UnsupportedMediaType(raw.to_string()))
    }
}

fn dns_message_response(response: UpstreamResponse) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static(DNS_MESSAGE_CONTENT_TYPE),
    );
    if let Some(cache_control) = response
        .cache_control
        .as_deref()
        .and_then(|v| HeaderValue::from_str(v).ok())
    {
        headers.insert(CACHE_CONTROL, cache_control);
    }

    (headers, response.bytes).into_response()
}
