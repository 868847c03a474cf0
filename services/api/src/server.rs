use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_intake_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fundboard::config::AppConfig;
use fundboard::error::AppError;
use fundboard::telemetry;
use fundboard::workflows::applications::{ApplicationIntakeService, MemoryTableStore, Reconciler};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    // Deployments persisting to Google Sheets wrap a pre-authenticated hub in
    // a GoogleSheetsStore; the stock binary keeps the table in process.
    let store = Arc::new(MemoryTableStore::default());
    let service = Arc::new(ApplicationIntakeService::new(store, Reconciler::standard()));

    let app = with_intake_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "investor application reconciler ready");

    axum::serve(listener, app).await?;
    Ok(())
}
