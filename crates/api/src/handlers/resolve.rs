use crate::{client_ip::ClientAddr, dto::ResolveParams, errors::ApiError, state::AppState};
use axum::{
    extract::{Query, State},
    http::{header::CONTENT_TYPE, HeaderValue},
    response::{IntoResponse, Response},
};
use doh_relay_domain::DomainError;
use tracing::{debug, instrument};

#[instrument(skip_all, name = "api_resolve")]
pub async fn resolve(
    State(state): State<AppState>,
    ClientAddr(client): ClientAddr,
    Query(params): Query<ResolveParams>,
) -> Result<Response, ApiError> {
    let query = params
        .into_query()
        .ok_or_else(|| DomainError::InvalidRequest("missing 'name' parameter".to_string()))?;

    let resolve_json = state
        .resolve_json
        .as_ref()
        .ok_or_else(|| DomainError::InvalidRequest("JSON resolution is disabled".to_string()))?;

    let answer = resolve_json.execute(&query, client).await?;
    debug!(
        name = %query.name,
        server = %answer.server,
        response_len = answer.body.len(),
        "JSON answer relayed"
    );

    let content_type = HeaderValue::from_str(&answer.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/dns-json"));

    Ok(([(CONTENT_TYPE, content_type)], answer.body).into_response())
}
