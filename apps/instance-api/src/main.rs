use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!(
        mongo_connect_timeout_secs = config.mongodb.connect_timeout_secs,
        neo4j_connection_timeout_secs = config.neo4j.connection_timeout_secs,
        "Driver settings loaded"
    );

    // Build router with API routes
    let api_routes = api::routes(&config);

    // Create a router with OpenAPI docs
    let router = create_router::<openapi::ApiDoc>(api_routes)?;

    // Merge health endpoints
    let app = router.merge(health_router(config.app));

    info!(
        "Starting {} v{} on {}",
        config.app.name,
        config.app.version,
        config.server.address()
    );

    // Every probe releases its own clients, so there is nothing left to clean up
    create_production_app(app, &config.server, config.server.shutdown_timeout(), async {
        info!("No pooled connections to release");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Instance API shutdown complete");
    Ok(())
}
