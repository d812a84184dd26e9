use axum::Router;
use doh_relay_api::{create_api_routes, AppState};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub async fn start_web_server(bind_addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    info!(
        bind_address = %bind_addr,
        doh_url = format!("http://{}/dns-query", bind_addr),
        "Starting web server"
    );

    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Web server started successfully");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn create_app(state: AppState) -> Router {
    create_api_routes(state).layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
