use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySessionRepository};
use crate::routes::with_directory_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use senate_directory::config::AppConfig;
use senate_directory::directory::DirectoryHandle;
use senate_directory::error::AppError;
use senate_directory::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    args.sources.apply(&mut config.data);

    telemetry::init(&config.telemetry)?;

    let directory = Arc::new(DirectoryHandle::new(config.data.clone()));
    match directory.current().await {
        Ok(loaded) => info!(legislators = loaded.len(), "directory preloaded"),
        Err(err) => warn!(error = %err, "directory unavailable at startup; retrying per request"),
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        directory: directory.clone(),
    };

    let sessions = Arc::new(InMemorySessionRepository::new(&config.sessions));
    let app = with_directory_routes(directory, sessions)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, records = %config.data.records_path.display(), "senate directory ready");

    axum::serve(listener, app).await?;
    Ok(())
}
