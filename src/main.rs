// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::chart_service::ChartService;
use crate::application::entry_service::EntryService;
use crate::application::streaming_service::StreamingDashboardService;
use crate::infrastructure::config::load_config;
use crate::infrastructure::http_gateway::HttpStatsGateway;
use crate::presentation::app_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("weatherdan_charts=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = load_config()?;

    // Create gateway (infrastructure layer)
    let gateway = Arc::new(HttpStatsGateway::new(config.backend.base_url.clone()));

    // Create services (application layer)
    let chart_service = ChartService::new(gateway.clone(), config.chart.theme.clone())
        .require_points(config.chart.require_points);
    let entry_service = EntryService::new(gateway);
    let streaming_service = StreamingDashboardService::new(chart_service.clone());

    // Create application state
    let state = Arc::new(AppState {
        chart_service,
        entry_service,
        streaming_service,
        default_max_entries: config.chart.default_max_entries,
    });

    // Build router (presentation layer)
    let router = presentation::router(state);

    // Start server
    let addr: SocketAddr = config.server.listen.parse()?;
    tracing::info!(
        "Starting weatherdan-charts on {} (backend {})",
        addr,
        config.backend.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
