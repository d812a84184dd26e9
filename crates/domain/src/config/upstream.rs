use serde::{Deserialize, Serialize};

/// Upstream resolvers the relay forwards to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// DoH endpoints tried in order (failover)
    #[serde(default = "default_servers")]
    pub servers: Vec<String>,

    /// JSON API endpoint used by `/resolve`; `None` disables the JSON path
    #[serde(default = "default_json_url")]
    pub json_url: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Passes over the server list before giving up
    #[serde(default = "default_attempts")]
    pub attempts: u32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            servers: default_servers(),
            json_url: default_json_url(),
            timeout_secs: default_timeout_secs(),
            attempts: default_attempts(),
        }
    }
}

impl UpstreamConfig {
    pub fn all_urls(&self) -> impl Iterator<Item = &str> {
        self.servers
            .iter()
            .map(String::as_str)
            .chain(self.json_url.as_deref())
    }
}

fn default_servers() -> Vec<String> {
    vec!["https://dns.google/dns-query".to_string()]
}

fn default_json_url() -> Option<String> {
    Some("https://dns.google/resolve".to_string())
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_attempts() -> u32 {
    2
}
