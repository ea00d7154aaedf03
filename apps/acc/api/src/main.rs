use axum::Router;
use axum_helpers::server::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use migration::Migrator;
use tracing::info;

mod api;
mod config;
mod state;

use config::{Config, Storage};
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let db = match &config.storage {
        Storage::Postgres(pg) => {
            let db = database::postgres::connect_from_config_with_retry(pg.clone(), None)
                .await
                .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

            if config.run_migrations {
                database::postgres::run_migrations::<Migrator>(&db, config.app.name)
                    .await
                    .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;
            }

            Some(db)
        }
        Storage::Memory => None,
    };

    let state = AppState { config, db };
    let app = build_router(&state)?;

    info!(
        address = %state.config.server.address(),
        "Starting acc API"
    );

    let server_config = state.config.server.clone();

    // The pool moves into the cleanup future
    create_app(app, &server_config, async move {
        if let Some(db) = state.db {
            info!("Shutting down: closing database connections");
            database::postgres::close(db).await;
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("acc API shutdown complete");
    Ok(())
}

/// Page routes plus the health endpoints, wrapped in the shared middleware.
///
/// - /health: liveness check with app name/version
/// - /ready: readiness check against the database
fn build_router(state: &AppState) -> eyre::Result<Router> {
    let routes = api::routes(state)?
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    Ok(create_router(routes))
}
