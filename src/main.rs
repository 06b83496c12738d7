// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::application::dashboard_service::DashboardService;
use crate::application::streaming_service::StreamingDashboardService;
use crate::infrastructure::config::{load_server_config, load_survey_config};
use crate::infrastructure::memory_repository::InMemorySurveyRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_dashboard, get_dataset, get_tab, health_check, list_occasions, stream_dashboard,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "retail_mood_dashboard=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let server_config = load_server_config().context("loading config/server")?;
    let survey_config = load_survey_config().context("loading config/survey")?;

    // Generate every table once (infrastructure layer)
    let repository = Arc::new(
        InMemorySurveyRepository::generate(&survey_config).context("generating survey data")?,
    );

    // Create services (application layer)
    let dashboard_service = DashboardService::new(repository, survey_config.dashboard.title.clone());
    let streaming_service = StreamingDashboardService::new(dashboard_service.clone());

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        streaming_service,
    });

    // Build router (presentation layer)
    // Note: responses are compressed by our own builders, so no CompressionLayer
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/stream", get(stream_dashboard))
        .route("/tabs/:slug", get(get_tab))
        .route("/datasets/:id", get(get_dataset))
        .route("/occasions", get(list_occasions))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = server_config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", server_config.server.bind))?;
    tracing::info!("Starting retail-mood-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
