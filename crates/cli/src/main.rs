use anyhow::Context;
use clap::Parser;
use doh_relay_api::{AppState, ClientIpExtractor};
use doh_relay_domain::CliOverrides;
use std::net::{IpAddr, SocketAddr};
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser, Debug)]
#[command(name = "doh-relay")]
#[command(version)]
#[command(about = "DNS-over-HTTPS relay that forwards the client subnet (EDNS Client Subnet) upstream")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long, env = "DOH_RELAY_BIND")]
    bind: Option<String>,

    /// HTTP listen port
    #[arg(short = 'p', long, env = "DOH_RELAY_PORT")]
    port: Option<u16>,

    /// Upstream DoH URL; repeat or comma-separate for failover order
    #[arg(
        short = 'u',
        long = "upstream",
        value_name = "URL",
        env = "DOH_RELAY_UPSTREAM",
        value_delimiter = ','
    )]
    upstream: Vec<String>,

    /// Source prefix length sent for IPv4 clients
    #[arg(long, env = "DOH_RELAY_IPV4_PREFIX")]
    ipv4_prefix: Option<u8>,

    /// Source prefix length sent for IPv6 clients
    #[arg(long, env = "DOH_RELAY_IPV6_PREFIX")]
    ipv6_prefix: Option<u8>,

    /// Header carrying the client address, set by the reverse proxy (empty to ignore)
    #[arg(long)]
    client_ip_header: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            bind_address: self.bind.clone(),
            port: self.port,
            upstream_servers: (!self.upstream.is_empty()).then(|| self.upstream.clone()),
            ipv4_prefix: self.ipv4_prefix,
            ipv6_prefix: self.ipv6_prefix,
            client_ip_header: self.client_ip_header.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;

    bootstrap::init_logging(&config.logging)?;

    info!("Starting DoH relay v{}", env!("CARGO_PKG_VERSION"));
    info!(
        upstreams = ?config.upstream.servers,
        json_upstream = ?config.upstream.json_url,
        ecs_enabled = config.ecs.enabled,
        ipv4_prefix = config.ecs.ipv4_prefix,
        ipv6_prefix = config.ecs.ipv6_prefix,
        client_ip_header = %config.ecs.client_ip_header,
        "Configuration loaded"
    );

    let use_cases = di::UseCases::new(&config)?;

    let app_state = AppState {
        relay: use_cases.relay,
        resolve_json: use_cases.resolve_json,
        client_ip: ClientIpExtractor::new(&config.ecs.client_ip_header)?,
    };

    let bind_ip: IpAddr = config
        .server
        .bind_address
        .parse()
        .with_context(|| format!("invalid bind address '{}'", config.server.bind_address))?;
    let web_addr = SocketAddr::new(bind_ip, config.server.port);

    server::start_web_server(web_addr, app_state).await?;

    info!("Server shutdown complete");
    Ok(())
}
