use serde::Deserialize;

/// `GET /dns-query?dns=<base64url>` (RFC 8484 §4.1)
#[derive(Deserialize, Debug)]
pub struct DnsQueryParams {
    pub dns: Option<String>,
}
