use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use wardflow::{api, config, db, occupancy};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let data_dir = config::app_data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let conn = db::open_database(&config::database_path())?;
    let db = Arc::new(Mutex::new(conn));
    tracing::info!(path = %config::database_path().display(), "record store opened");

    occupancy::spawn_snapshot_task(db.clone());

    let port = std::env::var("WARDFLOW_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(config::DEFAULT_API_PORT);
    let mut server = api::start_server(db, port).await?;
    tracing::info!(addr = %server.addr, "{} {} listening", config::APP_NAME, config::APP_VERSION);

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    server.shutdown();

    Ok(())
}
