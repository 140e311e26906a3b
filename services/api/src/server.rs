use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_selection_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use scholarship_saw::config::AppConfig;
use scholarship_saw::error::AppError;
use scholarship_saw::selection::{
    CriteriaCatalog, InMemoryRoster, JsonFileRoster, RosterRepository, SelectionService,
};
use scholarship_saw::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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

    match config.roster.storage_path.clone() {
        Some(path) => {
            let roster = Arc::new(JsonFileRoster::open(path)?);
            info!(path = %roster.path().display(), "using file-backed roster");
            serve_with(config, roster).await
        }
        None => {
            info!("using in-memory roster seeded with defaults");
            serve_with(config, Arc::new(InMemoryRoster::with_defaults())).await
        }
    }
}

async fn serve_with<R>(config: AppConfig, roster: Arc<R>) -> Result<(), AppError>
where
    R: RosterRepository + 'static,
{
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(SelectionService::new(roster, CriteriaCatalog::standard()));

    let app = with_selection_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "scholarship selection service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
