use anyhow::Result;
use parking_ops::{
    config::config_loader,
    infrastructure::{
        axum_http::http_serve,
        postgres::{postgres_connection, repositories::parking_store::ParkingStorePostgres},
    },
    observability,
};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        let message = startup_failure_message(&error);
        // The subscriber may not be installed if startup failed early.
        eprintln!("{message}");
        error!("{message}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    observability::init_observability("parking-ops")?;

    let dotenvy_env = Arc::new(config_loader::load()?);
    info!(stage = %config_loader::get_stage(), "ENV has been loaded");

    let postgres_pool = postgres_connection::establish_connection(
        &dotenvy_env.database.url,
        dotenvy_env.database.max_connections,
    )?;
    info!("Postgres connection has been established");

    let parking_store = Arc::new(ParkingStorePostgres::new(Arc::new(postgres_pool)));

    http_serve::start(dotenvy_env, parking_store).await
}

fn startup_failure_message(error: &anyhow::Error) -> String {
    format!("parking-ops exited with error: {:#}", error)
}
