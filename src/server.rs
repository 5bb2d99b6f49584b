//! HTTP server startup: open the database, build the router, serve until ctrl-c.

use anyhow::Result;

use crate::api::{self, AppState};
use crate::config::SeithiConfig;
use crate::db;

/// Open the configured database and wrap it with the config as router state.
pub fn setup_state(config: SeithiConfig) -> Result<AppState> {
    let db_path = config.resolved_db_path();
    let conn = db::open_database(&db_path)?;
    tracing::info!(db = %db_path.display(), "database ready");

    if config.ingest.secret.as_deref().map_or(true, str::is_empty) {
        tracing::warn!("no ingest secret configured (set INGEST_SECRET); POST /api/ingest will reject every request");
    }

    Ok(AppState::new(conn, config))
}

/// Start the JSON API on `[server].host:[server].port`.
pub async fn serve(config: SeithiConfig) -> Result<()> {
    let bind_addr = config.bind_addr();
    let state = setup_state(config)?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Seithi API listening at http://{bind_addr}/api");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutting down API server");
        })
        .await?;

    Ok(())
}
