use anyhow::Result;
use common::database::{ConnectionSource, DatabaseConfig, health_check, init_pool};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use users::{
    config::ServerConfig, repositories::PgUserStore, routes, state::AppState,
    telemetry::init_tracing,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_tracing(true)?;

    info!("Starting users service");

    let db_config = DatabaseConfig::from_env()?;
    let server_config = ServerConfig::from_env()?;

    // Long-lived process: connections come from a pool
    let pool = init_pool(&db_config).await?;
    let source = ConnectionSource::Pooled(pool);

    if health_check(&source).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    let app_state = AppState {
        store: Arc::new(PgUserStore::new(source.clone())),
        source,
    };

    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(server_config.bind_addr).await?;
    info!("Users service listening on {}", server_config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
