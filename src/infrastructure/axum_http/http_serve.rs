use crate::{
    config::config_model::DotEnvyConfig,
    domain::repositories::parking_store::ParkingStoreGateway,
    infrastructure::axum_http::{default_routers, routers},
};
use anyhow::{Context, Result};
use axum::{
    Router,
    http::{Method, StatusCode, header::CONTENT_TYPE},
    routing::get,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info};

/// The `/api/v1` routes over `parking_store`, without transport layers.
pub fn api_router<S>(parking_store: Arc<S>) -> Router
where
    S: ParkingStoreGateway + Send + Sync + 'static,
{
    Router::new()
        .fallback(default_routers::not_found)
        .nest(
            "/api/v1/tickets",
            routers::tickets::routes(Arc::clone(&parking_store)),
        )
        .nest(
            "/api/v1/lots",
            routers::lots::routes(Arc::clone(&parking_store)),
        )
        .nest(
            "/api/v1/drivers",
            routers::drivers::routes(Arc::clone(&parking_store)),
        )
        .route("/api/v1/health-check", get(default_routers::health_check))
}

pub async fn start<S>(config: Arc<DotEnvyConfig>, parking_store: Arc<S>) -> Result<()>
where
    S: ParkingStoreGateway + Send + Sync + 'static,
{
    let app = api_router(parking_store)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server.timeout),
        ))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes(
            config.server.body_limit,
        )?))
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([CONTENT_TYPE])
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running on port {}", config.server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn body_limit_bytes(body_limit_mib: u64) -> Result<usize> {
    let bytes = body_limit_mib
        .checked_mul(1024 * 1024)
        .context("SERVER_BODY_LIMIT is too large")?;
    usize::try_from(bytes).context("SERVER_BODY_LIMIT is too large")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
