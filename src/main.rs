mod config;
mod error;
mod extractors;
mod forecast;
mod middleware;
mod openapi;
mod routes;
mod schema;
mod upstream;
mod weather;

use reqwest::Client;
use std::{sync::Arc, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::forecast::ForecastService;
use crate::upstream::UpstreamClient;
use crate::weather::WeatherService;

/// Shared HTTP client configuration
const HTTP_POOL_IDLE_TIMEOUT_SECS: u64 = 90;
const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 10;

#[derive(Clone)]
pub struct AppState {
    pub weather_service: Arc<WeatherService>,
    pub forecast_service: Arc<ForecastService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wire services around one pooled upstream client
    pub fn new(config: AppConfig, http_client: Client) -> Self {
        let upstream = Arc::new(UpstreamClient::new(
            http_client,
            &config.openweathermap_base_url,
            &config.openweathermap_api_key,
        ));

        Self {
            weather_service: Arc::new(WeatherService::new(Arc::clone(&upstream))),
            forecast_service: Arc::new(ForecastService::new(upstream)),
            config: Arc::new(config),
        }
    }
}

/// Create shared HTTP client with connection pooling
fn create_http_client(config: &AppConfig) -> reqwest::Result<Client> {
    let mut builder = Client::builder()
        .pool_idle_timeout(Duration::from_secs(HTTP_POOL_IDLE_TIMEOUT_SECS))
        .pool_max_idle_per_host(HTTP_POOL_MAX_IDLE_PER_HOST);

    if let Some(secs) = config.upstream_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl+c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weathergate=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!(
        base_url = %config.openweathermap_base_url,
        timeout_secs = ?config.upstream_timeout_secs,
        "Configuration loaded successfully"
    );

    // Create shared HTTP client with connection pooling
    let http_client = create_http_client(&config)?;
    tracing::debug!("Shared HTTP client created");

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config, http_client);
    let app = routes::build_router(state);

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
