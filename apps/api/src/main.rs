mod config;
mod errors;
mod filter;
mod layout;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::filter::DisabledFilter;
use crate::layout::{default_page_geometry, PageGeometry};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting printsheet API v{}", env!("CARGO_PKG_VERSION"));

    // Default page: A4 portrait with the configured margin, no gaps.
    let default_geometry = PageGeometry {
        margin: config.page_margin_mm,
        ..default_page_geometry()
    };
    info!(
        "Default page geometry: {}x{}mm, margin {}mm, tolerance {}",
        default_geometry.page_width,
        default_geometry.page_height,
        default_geometry.margin,
        config.layout_tolerance
    );

    // No filter service is wired in; filter requests keep the original image.
    let filter = Arc::new(DisabledFilter);
    info!("Image filter backend: disabled");

    let state = AppState {
        config: config.clone(),
        filter,
        default_geometry,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
