use anyhow::Result;
use axum::{routing::get, serve, Router};
use chainpulse_core::{aggregator::Aggregator, config::AppConfig};
use std::sync::Arc;
use tokio::signal;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::compression::CompressionLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod router;

/// Initializes the logging system based on the configuration.
///
/// `RUST_LOG` takes precedence over the configured level when set.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,chainpulse_core={level},server={level}",
            level = config.logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format.as_str() == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        // "pretty" and any other format default to pretty logging
        let fmt_layer = tracing_subscriber::fmt::layer().pretty().with_target(false);
        registry.with(fmt_layer).init();
    }
}

/// Builds the application router with its middleware stack.
fn create_app(config: &AppConfig) -> Result<Router> {
    let aggregator = Arc::new(
        Aggregator::from_config(config)
            .map_err(|e| anyhow::anyhow!("explorer client initialization failed: {e}"))?,
    );

    let app = Router::new()
        .route("/api/metrics", get(router::handle_metrics))
        .route("/health", get(router::handle_health))
        .with_state(aggregator)
        .layer(ConcurrencyLimitLayer::new(config.server.max_concurrent_requests))
        .layer(CompressionLayer::new());

    Ok(app)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config =
        AppConfig::load().map_err(|e| anyhow::anyhow!("configuration validation failed: {e}"))?;
    init_logging(&config);

    info!(
        environment = %config.environment,
        explorer = %config.explorer.base_url,
        blocks_window = config.explorer.blocks_window,
        "starting chainpulse telemetry server"
    );

    let app = create_app(&config)?;
    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    info!(address = %config.socket_addr(), "telemetry server listening");

    if let Err(e) = serve(listener, app).with_graceful_shutdown(shutdown_signal()).await {
        error!(error = %e, "server error occurred");
    }

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install signal handler");
                () = std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, starting graceful shutdown");
}
