use serde::{Deserialize, Serialize};
use std::path::Path;

use super::ecs::EcsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

const LOCAL_CONFIG_PATH: &str = "doh-relay.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/doh-relay/config.toml";

/// Main configuration structure for the DoH relay
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (bind address, port)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream DoH and JSON resolvers
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Client subnet injection
    #[serde(default)]
    pub ecs: EcsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. doh-relay.toml in current directory
    /// 3. /etc/doh-relay/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path.map(str::to_string).or_else(Self::get_config_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(servers) = overrides.upstream_servers {
            if !servers.is_empty() {
                self.upstream.servers = servers;
            }
        }
        if let Some(prefix) = overrides.ipv4_prefix {
            self.ecs.ipv4_prefix = prefix;
        }
        if let Some(prefix) = overrides.ipv6_prefix {
            self.ecs.ipv6_prefix = prefix;
        }
        if let Some(header) = overrides.client_ip_header {
            self.ecs.client_ip_header = header;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("Port cannot be 0".to_string()));
        }

        if self.upstream.servers.is_empty() {
            return Err(ConfigError::Validation(
                "No upstream servers configured".to_string(),
            ));
        }

        for url in self.upstream.all_urls() {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ConfigError::Validation(format!(
                    "Upstream '{}' must be an http(s) URL",
                    url
                )));
            }
        }

        if self.upstream.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "Upstream timeout cannot be 0".to_string(),
            ));
        }

        if self.upstream.attempts == 0 {
            return Err(ConfigError::Validation(
                "Upstream attempts cannot be 0".to_string(),
            ));
        }

        self.ecs
            .masks()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        // Empty disables forwarding headers; the socket peer is always used.
        let header = self.ecs.client_ip_header.trim();
        if !header
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(ConfigError::Validation(format!(
                "Invalid client IP header name: {:?}",
                header
            )));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|path| Path::new(path).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub upstream_servers: Option<Vec<String>>,
    pub ipv4_prefix: Option<u8>,
    pub ipv6_prefix: Option<u8>,
    pub client_ip_header: Option<String>,
    pub log_level: Option<String>,
}
