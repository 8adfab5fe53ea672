//! Velour — salon management backend.
//!
//! Staff accounts, clients, services, employee profiles, appointment
//! scheduling with conflict detection, and sales derived from
//! finalized appointments. State lives in a single SQLite file; the
//! API is JSON over HTTP, bound to localhost by default.

pub mod api;
pub mod auth;
pub mod config;
pub mod core_state;
pub mod dashboard;
pub mod db;
pub mod models;
pub mod scheduling;
pub mod uploads;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::ApiServer;
use crate::config::Settings;
use crate::core_state::CoreState;

/// Run the application until Ctrl-C.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} v{} starting", config::APP_NAME, config::APP_VERSION);

    let settings = Settings::from_env();
    let data_dir = config::app_data_dir();
    let uploads_dir = config::uploads_dir();
    std::fs::create_dir_all(&data_dir)?;
    std::fs::create_dir_all(&uploads_dir)?;

    let db_path = config::database_path();
    // Open once up front so migrations run before the first request.
    let conn = db::open_database(&db_path)?;
    let schema_version = db::get_current_version(&conn);
    tracing::info!(version = schema_version, path = %db_path.display(), "Database ready");
    drop(conn);

    let core = Arc::new(CoreState::new(db_path, uploads_dir, settings));
    let server = ApiServer::start(core).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    server.shutdown().await;
    Ok(())
}
