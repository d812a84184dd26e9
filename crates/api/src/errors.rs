use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use doh_relay_domain::DomainError;
use serde_json::json;

pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::InvalidDnsMessage(_)
            | DomainError::InvalidRequest(_)
            | DomainError::InvalidPrefixLength(_) => StatusCode::BAD_REQUEST,

            DomainError::MessageTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,

            DomainError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,

            DomainError::TransportTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,

            DomainError::UpstreamStatus { .. }
            | DomainError::TransportError { .. }
            | DomainError::TransportAllServersUnreachable => StatusCode::BAD_GATEWAY,

            DomainError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "internal error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
