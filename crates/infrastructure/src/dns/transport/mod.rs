pub mod failover;
pub mod https;

pub use failover::FailoverTransport;
pub use https::HttpsTransport;

use std::sync::LazyLock;

/// Shared HTTP client with connection pooling, reused by every upstream.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .use_rustls_tls()
        .pool_max_idle_per_host(8)
        .user_agent(concat!("doh-relay/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
});

pub(crate) fn shared_client() -> &'static reqwest::Client {
    &SHARED_CLIENT
}
