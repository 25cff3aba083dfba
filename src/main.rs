//! QuickSearch-RS: serves suggestions from external suggestion providers
//!
//! This is the main entry point for the application.

use anyhow::Result;
use quicksearch_rs::{
    config,
    packages::StaticPackageRegistry,
    provider::HttpProviderClient,
    sources::SourceLoader,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration before logging so debug mode can raise the level
    let settings = config::discover()?;

    let level = if settings.general.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .init();

    info!("Starting QuickSearch-RS v{}", quicksearch_rs::VERSION);
    info!(
        "Loaded configuration for instance: {}",
        settings.general.instance_name
    );

    // Installed packages and provider transport
    let packages = Arc::new(StaticPackageRegistry::from_configs(&settings.packages));
    info!("Package registry initialized with {} packages", packages.len());

    let client = Arc::new(HttpProviderClient::with_settings(&settings.outgoing)?);
    info!("Provider client initialized");

    // Load sources
    let registry = SourceLoader::load(&settings, packages, client);
    info!("Loaded {} suggestion sources", registry.len());

    // Create application state
    let state = AppState::new(settings.clone(), registry);
    info!("Application state initialized");

    // Create router
    let app = create_router(state);

    // Bind address
    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    info!("Starting server on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
