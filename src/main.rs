//! sim-gateway server entry point.
//!
//! Loads configuration, then serves the websocket and HTTP endpoints.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use sim_gateway::app_state::AppState;
use sim_gateway::config::GatewayConfig;
use sim_gateway::server;
use sim_gateway::service::DispatchService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Load configuration
    let config = GatewayConfig::from_env().context("loading configuration")?;
    tracing::info!(
        addr = %config.listen_addr,
        randomize = %config.randomize_command,
        simulate = %config.simulate_command,
        max_processes = config.max_concurrent_processes,
        timeout_secs = config.command_timeout_secs,
        "starting sim-gateway"
    );

    let app_state = AppState::new(DispatchService::from_config(&config));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;

    server::serve(listener, app_state).await?;

    Ok(())
}
