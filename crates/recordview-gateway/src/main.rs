//! recordview HTTP/JSON Gateway binary.

use std::sync::Arc;

use clap::Parser;
use recordview_core::{RecordService, RecordSource};
use recordview_gateway::{create_router, AppState, Args, GatewayConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line args
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "recordview_gateway={level},recordview_core={level},tower_http=info",
                    level = args.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from(&args);

    info!(
        listen = %config.listen_addr,
        source = ?config.source,
        cors_origin = %config.cors_origin,
        "Starting recordview gateway"
    );

    let source = RecordSource::from_config(&config.source)?;
    info!(location = %source.location(), "Record source ready");
    let service = RecordService::new(Arc::new(source));

    if config.preload {
        let count = service.warm().await?;
        info!(records = count, "Preloaded record collection");
    }

    // Create application state
    let state = AppState::new(service, config.clone());

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!("Gateway listening on {}", config.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
